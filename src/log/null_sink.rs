use crate::log::{log_level::LogLevel, log_sink::LogSink};

/// Discards every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    #[inline]
    fn log(&self, _level: LogLevel, _line: &str) {}
}
