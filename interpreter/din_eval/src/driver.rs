//! Host-facing driver API.
//!
//! The driver ties the phases together: `parse` builds a program,
//! `execute` runs one under a [`Config`] and returns [`Stats`], and the
//! `run_program` family bundles parse + execute + output capture + timing
//! into a single `(ok, combined_output)` call for hosts that just want
//! the text.
//!
//! Positioned errors are rendered with the source excerpt (dividers,
//! offending line, caret) followed by the diagnostic message.

use std::time::Instant;

use din_diagnostic::{show_error_source, Diagnostic};
use din_ir::Program;
use tracing::debug;

use crate::config::{Config, RunOptions, Stats};
use crate::control::Unwind;
use crate::interpreter::Interpreter;
use crate::print_handler::buffer_handler;

/// Parse a program from source bytes.
///
/// # Errors
/// Returns the first syntax error as a `Parse`-category diagnostic.
pub fn parse(source: &[u8]) -> Result<Program, Diagnostic> {
    din_parse::parse_program(source)
}

/// Execute a parsed program under `config`.
///
/// Control flow that escapes its scope surfaces here as a runtime
/// diagnostic; `exit()` is a normal termination.
///
/// # Errors
/// Returns the diagnostic of the first uncaught runtime failure.
pub fn execute(program: &Program, config: Config) -> Result<Stats, Diagnostic> {
    let mut interp = Interpreter::new(config);
    let result = interp.execute(program);
    let stats = interp.stats();
    debug!(
        ops = stats.ops,
        user_calls = stats.user_calls,
        builtin_calls = stats.builtin_calls,
        "execution finished"
    );
    match result {
        Ok(()) | Err(Unwind::Exit(_)) => Ok(stats),
        Err(Unwind::Failure(diag)) => Err(diag),
        Err(Unwind::Break(pos)) => Err(Diagnostic::runtime_error(pos, "break outside loop")),
        Err(Unwind::Continue(pos)) => Err(Diagnostic::runtime_error(pos, "continue outside loop")),
        Err(Unwind::Return(_, pos)) => {
            Err(Diagnostic::runtime_error(pos, "can't return at top level"))
        }
    }
}

/// Render a diagnostic with its source excerpt: dividers as wide as the
/// message, the offending line, a caret, then the message itself.
fn render_error(source: &str, diag: &Diagnostic) -> String {
    let message = diag.to_string();
    let mut out = show_error_source(source, diag.pos, message.len());
    out.push_str(&message);
    out
}

/// Syntax-check `source` without executing it.
///
/// Returns `(true, "All syntax is correct\n")` on success, or `(false,
/// excerpt + message)` on the first syntax error.
pub fn analyze_syntax(source: &str) -> (bool, String) {
    match parse(source.as_bytes()) {
        Ok(_) => (true, "All syntax is correct\n".to_string()),
        Err(diag) => (false, render_error(source, &diag)),
    }
}

/// Parse and execute `source`, capturing output.
///
/// Returns `(true, program_output)` on success or `(false, excerpt +
/// message)` on the first error.
pub fn run_program(source: &str) -> (bool, String) {
    run_program_with_options(source, &RunOptions::default())
}

/// [`run_program`] with control over the profiling footer.
pub fn run_program_with_options(source: &str, options: &RunOptions) -> (bool, String) {
    let program = match parse(source.as_bytes()) {
        Ok(program) => program,
        Err(diag) => return (false, render_error(source, &diag)),
    };

    let output = buffer_handler();
    // Captured output, but a real run: main is auto-invoked.
    let config = Config {
        output: output.clone(),
        is_unit_test: false,
        ..Config::test()
    };

    let started = Instant::now();
    let stats = match execute(&program, config) {
        Ok(stats) => stats,
        Err(diag) => {
            let mut console = output.get_output();
            console.push_str(&render_error(source, &diag));
            return (false, console);
        }
    };
    let elapsed = started.elapsed();

    let mut console = output.get_output();
    if options.show_profiling {
        let secs = elapsed.as_secs_f64();
        let rate = |count: u64| -> u64 {
            if secs > 0.0 {
                (count as f64 / secs) as u64
            } else {
                0
            }
        };
        console.push_str(&format!("\nTime Program Execution: {elapsed:?}\n"));
        console.push_str(&format!(
            "Elapsed Operation: {} Ops ({}/s)\n",
            stats.ops,
            rate(stats.ops)
        ));
        console.push_str(&format!(
            "Builtin Calls: {} ({}/s)\n",
            stats.builtin_calls,
            rate(stats.builtin_calls)
        ));
        console.push_str(&format!(
            "User Calls: {} ({}/s)\n",
            stats.user_calls,
            rate(stats.user_calls)
        ));
    }
    (true, console)
}
