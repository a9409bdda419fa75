//! Control-flow unwinding.
//!
//! `break`, `continue`, `return`, runtime failures, and `exit` all
//! terminate a block early. They travel through the error slot of
//! [`Exec`], and every loop and call site matches exhaustively: a loop
//! consumes `Break`/`Continue`, a user-function call consumes `Return`, a
//! `try` statement consumes `Failure`, and nothing consumes `Exit` until
//! the driver.

use din_diagnostic::Diagnostic;
use din_ir::Position;

use crate::Value;

/// Result alias for every fallible evaluator operation.
pub type Exec<T> = Result<T, Unwind>;

/// The reason a block stopped before its last statement.
#[derive(Clone, Debug)]
pub enum Unwind {
    /// `break`, consumed by the innermost enclosing loop.
    Break(Position),
    /// `continue`, consumed by the innermost enclosing loop.
    Continue(Position),
    /// `return value`, consumed by the innermost enclosing user call.
    Return(Value, Position),
    /// A runtime error, consumed by the innermost enclosing `try`.
    Failure(Diagnostic),
    /// `exit(code)`: nothing consumes this; the driver ends the run.
    Exit(i32),
}

impl Unwind {
    /// Whether this unwind is a runtime failure (the only variant `try`
    /// recovers from).
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Unwind::Failure(_))
    }
}

impl From<Diagnostic> for Unwind {
    #[inline]
    fn from(diag: Diagnostic) -> Self {
        Unwind::Failure(diag)
    }
}
