//! Source locations.
//!
//! Din reports locations as 1-based `(line, column)` pairs rather than byte
//! offsets: the tokenizer is the only phase that sees raw bytes, so it
//! resolves positions up front and every later phase just carries them.

use std::fmt;

/// A 1-based line/column source location.
///
/// Advanced by the tokenizer: a newline increments `line` and resets
/// `column` to 1; any other scalar increments `column`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl Position {
    /// Position used for synthesized nodes with no source location.
    pub const DUMMY: Position = Position { line: 0, column: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// The position of the first character of a source file.
    #[inline]
    pub const fn start() -> Self {
        Position { line: 1, column: 1 }
    }

    /// Advance past one character: newline moves to the next line's first
    /// column, everything else moves one column right.
    #[inline]
    #[must_use]
    pub fn advanced(self, ch: char) -> Self {
        if ch == '\n' {
            Position {
                line: self.line + 1,
                column: 1,
            }
        } else {
            Position {
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
