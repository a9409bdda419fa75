//! Din CLI.
//!
//! Thin wrapper over the `din_eval` driver: reads a script, runs it (or
//! just syntax-checks it with `--analyze`), and renders positioned errors
//! with their source excerpt.

mod commands;

use commands::{analyze_file, list_examples, run_file};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let mut profile = false;
    let mut analyze = false;
    args.retain(|arg| match arg.as_str() {
        "--profile" | "-p" => {
            profile = true;
            false
        }
        "--analyze" | "-a" => {
            analyze = true;
            false
        }
        _ => true,
    });

    match args.first().map(String::as_str) {
        None | Some("--help") | Some("-h") => print_usage(),
        Some("--version") => println!("din {VERSION}"),
        Some("--examples") => list_examples(),
        Some(path) => {
            let script_args = args[1..].to_vec();
            let code = if analyze {
                analyze_file(path)
            } else {
                run_file(path, script_args, profile)
            };
            std::process::exit(code);
        }
    }
}

fn print_usage() {
    println!("Din {VERSION} - a small scripting language");
    println!();
    println!("Usage: din <file.din> [script args...]");
    println!();
    println!("Options:");
    println!("  -a, --analyze    Check syntax without executing");
    println!("  -p, --profile    Print execution statistics after the run");
    println!("      --examples   List bundled demo programs");
    println!("  -h, --help       Show this help");
    println!("      --version    Show the version");
}
