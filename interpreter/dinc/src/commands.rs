//! CLI commands: run, analyze, list demos.

use std::time::Instant;

use din_diagnostic::{show_error_source, Diagnostic};
use din_eval::{execute, parse, stdout_handler, Config, InputHandler};

/// Directory holding the bundled demo programs.
const DEMOS_DIR: &str = "demos";

/// Read a script, reporting a friendly error on failure.
fn read_source(path: &str) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            eprintln!("din: can't read {path}: {err}");
            None
        }
    }
}

/// Render a positioned diagnostic with its source excerpt to stderr.
fn report(source: &[u8], diag: &Diagnostic) {
    let source = String::from_utf8_lossy(source);
    let message = diag.to_string();
    eprint!("{}", show_error_source(&source, diag.pos, message.len()));
    eprintln!("{message}");
}

/// Run a script. Returns the process exit code.
pub fn run_file(path: &str, script_args: Vec<String>, profile: bool) -> i32 {
    let Some(source) = read_source(path) else {
        return 1;
    };

    let program = match parse(&source) {
        Ok(program) => program,
        Err(diag) => {
            report(&source, &diag);
            return 1;
        }
    };

    let config = Config {
        args: script_args,
        input: InputHandler::Stdin,
        output: stdout_handler(),
        exit: Some(Box::new(|code| std::process::exit(code))),
        ..Config::default()
    };

    let started = Instant::now();
    match execute(&program, config) {
        Ok(stats) => {
            if profile {
                let elapsed = started.elapsed();
                eprintln!();
                eprintln!("Time Program Execution: {elapsed:?}");
                eprintln!("Operations: {}", stats.ops);
                eprintln!("User Calls: {}", stats.user_calls);
                eprintln!("Builtin Calls: {}", stats.builtin_calls);
                eprintln!("Total: {}", stats.total());
            }
            0
        }
        Err(diag) => {
            report(&source, &diag);
            1
        }
    }
}

/// Syntax-check a script without running it. Returns the process exit
/// code.
pub fn analyze_file(path: &str) -> i32 {
    let Some(source) = read_source(path) else {
        return 1;
    };
    let source_str = String::from_utf8_lossy(&source).into_owned();
    let (ok, report) = din_eval::analyze_syntax(&source_str);
    print!("{report}");
    if ok {
        0
    } else {
        1
    }
}

/// List the bundled demo programs.
pub fn list_examples() {
    let Ok(entries) = std::fs::read_dir(DEMOS_DIR) else {
        println!("No demo programs found (missing {DEMOS_DIR}/ directory)");
        return;
    };
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".din"))
        .collect();
    names.sort();

    if names.is_empty() {
        println!("No demo programs found in {DEMOS_DIR}/");
        return;
    }
    println!("Demo programs in {DEMOS_DIR}/:");
    for name in names {
        println!("  {name}");
    }
}
