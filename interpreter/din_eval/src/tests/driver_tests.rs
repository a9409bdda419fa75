//! Driver API tests: `analyze_syntax`, `run_program`, and the error
//! excerpt format.

use crate::config::RunOptions;
use crate::driver::{analyze_syntax, run_program, run_program_with_options};

#[test]
fn analyze_syntax_accepts_valid_programs() {
    let (ok, report) = analyze_syntax("fun main(): print(1) end");
    assert!(ok);
    assert_eq!(report, "All syntax is correct\n");
}

#[test]
fn analyze_syntax_reports_the_first_error_with_an_excerpt() {
    let (ok, report) = analyze_syntax("x = 1\ny = )\n");
    assert!(!ok);
    assert!(report.contains("y = )"), "{report}");
    assert!(report.contains('^'), "{report}");
    assert!(report.contains("parse error at 2:5:"), "{report}");
}

#[test]
fn run_program_captures_output() {
    let (ok, output) = run_program("fun main(): print(\"hi\") end");
    assert!(ok);
    assert_eq!(output, "hi\n");
}

#[test]
fn run_program_reports_runtime_errors_with_an_excerpt() {
    let (ok, output) = run_program("fun main(): x = 10 / 0 end");
    assert!(!ok);
    assert!(output.contains("value error"), "{output}");
    assert!(output.contains("can't divide by zero"), "{output}");
    assert!(output.contains("x = 10 / 0"), "{output}");
}

#[test]
fn run_program_keeps_output_printed_before_the_error() {
    let (ok, output) = run_program("fun main(): print(\"first\") x = [1][9] end");
    assert!(!ok);
    assert!(output.starts_with("first\n"), "{output}");
    assert!(output.contains("subscript 9 out of range"), "{output}");
}

#[test]
fn profiling_footer_is_opt_in() {
    let source = "fun main(): print(1) end";

    let (ok, plain) = run_program(source);
    assert!(ok);
    assert!(!plain.contains("Time Program Execution"), "{plain}");

    let options = RunOptions {
        show_profiling: true,
    };
    let (ok, profiled) = run_program_with_options(source, &options);
    assert!(ok);
    assert!(profiled.contains("Time Program Execution"), "{profiled}");
    assert!(profiled.contains("Elapsed Operation:"), "{profiled}");
    assert!(profiled.contains("Builtin Calls:"), "{profiled}");
    assert!(profiled.contains("User Calls:"), "{profiled}");
}

#[test]
fn excerpt_format_matches_the_documented_layout() {
    // parse error at 1:5: expected expression, not EOF  -> 45 chars wide
    let (_, report) = analyze_syntax("x = ");
    let lines: Vec<&str> = report.lines().collect();
    let message = lines[4];
    assert!(message.starts_with("parse error at 1:5:"), "{report}");
    assert_eq!(lines[0], "-".repeat(message.len()), "{report}");
    assert_eq!(lines[3], lines[0], "{report}");
    assert_eq!(lines[1], "x = ");
    assert_eq!(lines[2], "    ^");
}
