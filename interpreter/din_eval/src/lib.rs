//! Din Eval - tree-walking evaluator for the Din language.
//!
//! This crate owns everything that happens after parsing:
//!
//! - [`Value`]: the dynamic value representation (reference-semantic
//!   arrays/objects behind [`Shared`] cells, value-semantic scalars)
//! - [`Environment`]: the scope stack, with closure capture by frame
//!   reference
//! - [`Interpreter`]: statement execution and expression evaluation, with
//!   `break`/`continue`/`return`/error unwinding modeled as the [`Unwind`]
//!   sum type in the error slot of [`Exec`]
//! - [`builtins`]: the ~90-function built-in library
//! - [`driver`]: the host-facing API (`parse`, `execute`, `analyze_syntax`,
//!   `run_program`) plus [`Config`] and [`Stats`]
//!
//! # Architecture
//!
//! Evaluation is direct AST interpretation. Loops and calls match
//! exhaustively on `Unwind` and either consume a variant (a loop consumes
//! `Break`/`Continue`, a call consumes `Return`, a `try` consumes
//! `Failure`) or propagate it; whatever reaches the driver is translated
//! into a final [`din_diagnostic::Diagnostic`] or, for `Exit`, a normal
//! termination.

pub mod builtins;
mod config;
mod control;
pub mod driver;
mod environment;
mod errors;
mod input;
mod interpreter;
mod iterator;
mod operators;
mod print_handler;
mod rng;
mod shared;
mod stack;
#[cfg(test)]
mod tests;
mod unary_operators;
mod value;

pub use config::{Config, ExitHook, RunOptions, Stats};
pub use control::{Exec, Unwind};
pub use driver::{analyze_syntax, execute, parse, run_program, run_program_with_options};
pub use environment::{Environment, Frame};
pub use input::InputHandler;
pub use interpreter::Interpreter;
pub use iterator::iterate;
pub use operators::{eval_equal, eval_less, eval_subscript, evaluate_binary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use shared::Shared;
pub use unary_operators::evaluate_unary;
pub use value::{BuiltinImpl, FunctionValue, ObjectMap, UserFunction, Value};
