//! Diagnostic system for Din.
//!
//! Every failure the interpreter can report is a [`Diagnostic`]: a
//! [`Category`], a source [`Position`], and a message. The rendered form is
//! stable and user-visible — `"type error at 3:5: ..."` — because scripts
//! can observe it through `catch` and match on its text, so it is part of
//! the language surface, not just presentation.
//!
//! [`excerpt`] renders the offending source line with a caret marker for
//! terminal output.

mod diagnostic;
pub mod excerpt;

pub use diagnostic::{Category, Diagnostic};
pub use excerpt::{divider, show_error_source};
