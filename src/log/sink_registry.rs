use std::sync::Arc;

use parking_lot::RwLock;

use crate::log::{log_level::LogLevel, log_sink::LogSink};

/// Holds the currently active sink and swaps it as a single reference.
///
/// Swaps are last-writer-wins. Dispatch clones the current reference and
/// calls the sink after the lock is released, so a sink may itself swap
/// the registry without deadlocking.
pub struct SinkRegistry {
    current: RwLock<Arc<dyn LogSink>>,
    default: Arc<dyn LogSink>,
}

impl SinkRegistry {
    /// Starts out delivering to `default`, which is also what `set_sink(None)` restores.
    #[must_use]
    pub fn new(default: Arc<dyn LogSink>) -> Self {
        Self {
            current: RwLock::new(Arc::clone(&default)),
            default,
        }
    }

    /// Installs `sink`, or the default sink for `None`, and returns the previous one.
    pub fn set_sink(&self, sink: Option<Arc<dyn LogSink>>) -> Arc<dyn LogSink> {
        let next = sink.unwrap_or_else(|| Arc::clone(&self.default));
        std::mem::replace(&mut *self.current.write(), next)
    }

    #[must_use]
    pub fn get_sink(&self) -> Arc<dyn LogSink> {
        Arc::clone(&self.current.read())
    }

    #[must_use]
    pub fn default_sink(&self) -> Arc<dyn LogSink> {
        Arc::clone(&self.default)
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        Arc::ptr_eq(&self.current.read(), &self.default)
    }

    /// Hands `line` to the current sink.
    pub fn dispatch(&self, level: LogLevel, line: &str) {
        let sink = self.get_sink();
        sink.log(level, line);
    }
}

impl std::fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("is_default", &self.is_default())
            .finish_non_exhaustive()
    }
}
