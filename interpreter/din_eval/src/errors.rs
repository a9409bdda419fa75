//! Error constructors for the evaluator.
//!
//! One import point for building [`Unwind::Failure`] values in each
//! runtime category, so call sites read as `Err(type_error(pos, ...))`
//! rather than spelling out the diagnostic plumbing.

use din_diagnostic::Diagnostic;
use din_ir::Position;

use crate::Unwind;

/// A `type error` failure: wrong types or wrong argument counts.
pub(crate) fn type_error(pos: Position, message: impl Into<String>) -> Unwind {
    Unwind::Failure(Diagnostic::type_error(pos, message))
}

/// A `value error` failure: type-correct but contextually invalid values.
pub(crate) fn value_error(pos: Position, message: impl Into<String>) -> Unwind {
    Unwind::Failure(Diagnostic::value_error(pos, message))
}

/// A `name error` failure: unbound variable or function name.
pub(crate) fn name_error(pos: Position, message: impl Into<String>) -> Unwind {
    Unwind::Failure(Diagnostic::name_error(pos, message))
}

/// A generic `runtime error` failure (import failures and friends).
pub(crate) fn runtime_error(pos: Position, message: impl Into<String>) -> Unwind {
    Unwind::Failure(Diagnostic::runtime_error(pos, message))
}
