//! Print handler for configurable output.
//!
//! `print()` output can be directed to different destinations:
//! - Native runs: stdout (default)
//! - Embedding and tests: an in-memory buffer for capture and assertions
//! - Silent: discard everything
//!
//! Enum dispatch instead of trait objects keeps this frequently-hit path
//! free of vtable indirection.

use parking_lot::Mutex;

/// Default print handler that writes to stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }

    /// Print without newline.
    pub fn print(&self, msg: &str) {
        print!("{msg}");
    }

    /// Captured output. Always empty: stdout doesn't capture.
    pub fn get_output(&self) -> String {
        String::new()
    }
}

/// Print handler that captures output to a buffer.
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    /// Create an empty buffer handler.
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: Mutex::new(String::new()),
        }
    }

    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// Print without newline.
    pub fn print(&self, msg: &str) {
        self.buffer.lock().push_str(msg);
    }

    /// All captured output.
    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Clear captured output.
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Print handler with enum dispatch.
pub enum PrintHandlerImpl {
    /// Writes to stdout (default).
    Stdout(StdoutPrintHandler),
    /// Captures to a buffer (embedding/testing).
    Buffer(BufferPrintHandler),
    /// Discards all output.
    Silent,
}

impl PrintHandlerImpl {
    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    /// Print without newline.
    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => h.print(msg),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Stdout(h) => h.get_output(),
            Self::Buffer(h) => h.get_output(),
            Self::Silent => String::new(),
        }
    }
}

/// Shared print handler handed to the interpreter via `Config`.
pub type SharedPrintHandler = std::sync::Arc<PrintHandlerImpl>;

/// Create a stdout print handler.
pub fn stdout_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

/// Create a buffer print handler for capturing output.
pub fn buffer_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

/// Create a silent print handler that discards all output.
pub fn silent_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Silent)
}
