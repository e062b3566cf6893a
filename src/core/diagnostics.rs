use std::cell::RefCell;

use console::style;

/// The host's warning channel. A warning aborts the enclosing task.
pub trait Diagnostics {
    fn warn(&self, message: &str);
}

/// Writes warnings to stderr, independent of the configured log level
#[derive(Debug, Default)]
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn warn(&self, message: &str) {
        eprintln!("{} {}", style("Warning:").yellow().bold(), message);
    }
}

/// Keeps warnings in memory for hosts that report them later
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    messages: RefCell<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
