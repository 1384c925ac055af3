//! Output capture
//!
//! Step bindings write diagnostic output through a [`TestOutput`] registered into the runner. The
//! bridge reads it back once the scenario is over and attaches it to the result messages.

use parking_lot::Mutex;

/// A sink for per-test output.
pub trait TestOutput: Send + Sync {
    /// Append a line of output
    fn write_line(&self, line: &str);

    /// Everything written so far
    fn output(&self) -> String;
}

/// Thread-safe in-memory [`TestOutput`]
#[derive(Default)]
pub struct OutputCapture {
    buffer: Mutex<String>,
}

impl OutputCapture {
    /// Create an empty capture buffer
    pub fn new() -> Self {
        Self::default()
    }
}

impl TestOutput for OutputCapture {
    fn write_line(&self, line: &str) {
        let mut buffer = self.buffer.lock();
        buffer.push_str(line);
        buffer.push('\n');
    }

    fn output(&self) -> String {
        self.buffer.lock().clone()
    }
}
