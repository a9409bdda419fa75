//! Interpreter configuration and execution statistics.

use crate::input::InputHandler;
use crate::print_handler::{buffer_handler, stdout_handler, SharedPrintHandler};
use crate::value::Value;

/// Hook invoked by the `exit()` built-in before evaluation unwinds.
pub type ExitHook = Box<dyn Fn(i32)>;

/// Configures the interpreter's interaction with the outside world.
pub struct Config {
    /// Pre-defined variables seeded into the global frame.
    pub vars: Vec<(String, Value)>,
    /// Program arguments, exposed through the `args()` built-in.
    pub args: Vec<String>,
    /// Input source for the `read()` built-in.
    pub input: InputHandler,
    /// Output sink for the `print()` built-in.
    pub output: SharedPrintHandler,
    /// Called by the `exit()` built-in; evaluation unwinds afterwards
    /// either way.
    pub exit: Option<ExitHook>,
    /// Suppresses the automatic invocation of `main` after the top-level
    /// statements run.
    pub is_unit_test: bool,
}

impl Config {
    /// Configuration suitable for tests and embedding: buffered output, no
    /// input, no exit hook, `main` not auto-invoked.
    pub fn test() -> Self {
        Config {
            vars: Vec::new(),
            args: Vec::new(),
            input: InputHandler::Empty,
            output: buffer_handler(),
            exit: None,
            is_unit_test: true,
        }
    }
}

impl Default for Config {
    /// Interactive defaults: stdout output, stdin input, `main`
    /// auto-invoked.
    fn default() -> Self {
        Config {
            vars: Vec::new(),
            args: Vec::new(),
            input: InputHandler::Stdin,
            output: stdout_handler(),
            exit: None,
            is_unit_test: false,
        }
    }
}

/// Options for [`driver::run_program_with_options`](crate::driver).
#[derive(Copy, Clone, Debug, Default)]
pub struct RunOptions {
    /// Append the timing/ops profiling footer to the combined output.
    pub show_profiling: bool,
}

/// Execution statistics, returned by the driver.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Total statements executed plus expression nodes visited.
    pub ops: u64,
    /// User-defined function invocations.
    pub user_calls: u64,
    /// Built-in function invocations.
    pub builtin_calls: u64,
}

impl Stats {
    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.ops + self.user_calls + self.builtin_calls
    }
}
