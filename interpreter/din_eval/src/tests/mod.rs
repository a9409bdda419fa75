//! Program-level tests: parse + execute through the public driver.

mod builtin_tests;
mod driver_tests;

use crate::config::Config;
use crate::print_handler::buffer_handler;

/// Run a program with captured output and `main` auto-invocation;
/// panic on any error.
pub(crate) fn run(source: &str) -> String {
    let output = buffer_handler();
    let config = Config {
        output: output.clone(),
        is_unit_test: false,
        ..Config::test()
    };
    let program = crate::driver::parse(source.as_bytes()).expect("program should parse");
    crate::driver::execute(&program, config).expect("program should execute");
    output.get_output()
}

/// Run a program and return the lines it printed.
pub(crate) fn run_lines(source: &str) -> Vec<String> {
    run(source).lines().map(str::to_string).collect()
}

/// Run a program expected to fail; returns the rendered diagnostic.
pub(crate) fn run_err(source: &str) -> String {
    let output = buffer_handler();
    let config = Config {
        output: output.clone(),
        is_unit_test: false,
        ..Config::test()
    };
    let program = crate::driver::parse(source.as_bytes()).expect("program should parse");
    crate::driver::execute(&program, config)
        .expect_err("program should fail")
        .to_string()
}
