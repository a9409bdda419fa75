//! Input source for the `read()` built-in.
//!
//! Mirrors the print handler's enum-dispatch shape: process stdin for
//! native runs, an in-memory buffer for embedding and tests, or nothing.

use std::io::BufRead;

use parking_lot::Mutex;

/// Where `read()` reads from.
pub enum InputHandler {
    /// Process standard input.
    Stdin,
    /// An in-memory buffer; each `read_line` consumes up to one newline.
    Buffer(Mutex<String>),
    /// No input: `read()` always reports end of input.
    Empty,
}

impl InputHandler {
    /// Create a buffered input over `contents`.
    pub fn buffer(contents: impl Into<String>) -> Self {
        InputHandler::Buffer(Mutex::new(contents.into()))
    }

    /// Read one line, without its trailing newline. `None` at end of
    /// input.
    pub fn read_line(&self) -> Option<String> {
        match self {
            InputHandler::Stdin => {
                let mut line = String::new();
                let n = std::io::stdin().lock().read_line(&mut line).ok()?;
                if n == 0 {
                    return None;
                }
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
            InputHandler::Buffer(remaining) => {
                let mut buf = remaining.lock();
                if buf.is_empty() {
                    return None;
                }
                let line = match buf.find('\n') {
                    Some(idx) => {
                        let mut line: String = buf.drain(..=idx).collect();
                        line.pop();
                        if line.ends_with('\r') {
                            line.pop();
                        }
                        line
                    }
                    None => std::mem::take(&mut *buf),
                };
                Some(line)
            }
            InputHandler::Empty => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        InputHandler::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_reads_line_by_line() {
        let input = InputHandler::buffer("one\ntwo\nthree");
        assert_eq!(input.read_line().as_deref(), Some("one"));
        assert_eq!(input.read_line().as_deref(), Some("two"));
        assert_eq!(input.read_line().as_deref(), Some("three"));
        assert_eq!(input.read_line(), None);
    }

    #[test]
    fn buffer_strips_crlf() {
        let input = InputHandler::buffer("win\r\nline");
        assert_eq!(input.read_line().as_deref(), Some("win"));
        assert_eq!(input.read_line().as_deref(), Some("line"));
    }

    #[test]
    fn empty_input_is_immediately_done() {
        assert_eq!(InputHandler::Empty.read_line(), None);
    }

    #[test]
    fn empty_buffer_is_done() {
        assert_eq!(InputHandler::buffer("").read_line(), None);
    }
}
