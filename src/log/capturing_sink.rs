use parking_lot::Mutex;

use crate::log::{log_level::LogLevel, log_sink::LogSink};

/// One line as received by a [`CapturingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine {
    pub level: LogLevel,
    pub text: String,
}

/// Records every delivered line in memory.
///
/// Used by tests and by the self-test routines to observe exactly what the
/// formatter handed to its sink.
#[derive(Debug, Default)]
pub struct CapturingSink {
    lines: Mutex<Vec<CapturedLine>>,
}

impl CapturingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<CapturedLine> {
        self.lines.lock().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<CapturedLine> {
        self.lines.lock().last().cloned()
    }

    /// Length of the most recent line, the value a length-checking caller cares about.
    #[must_use]
    pub fn last_len(&self) -> Option<usize> {
        self.lines.lock().last().map(|l| l.text.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Drains and returns everything captured so far.
    pub fn take(&self) -> Vec<CapturedLine> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl LogSink for CapturingSink {
    fn log(&self, level: LogLevel, line: &str) {
        self.lines.lock().push(CapturedLine {
            level,
            text: line.to_owned(),
        });
    }
}
