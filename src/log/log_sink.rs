use crate::log::log_level::LogLevel;

/// Consumer of fully rendered log lines.
///
/// `line.len()` is the rendered length; an empty line is a valid delivery.
/// Write failures are the sink's own business and are never reported back
/// to the emitting caller.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, line: &str);
}

/// Plain callbacks work as sinks, e.g. `Arc::new(|_, line: &str| eprint!("{line}"))`.
impl<F> LogSink for F
where
    F: Fn(LogLevel, &str) + Send + Sync,
{
    #[inline]
    fn log(&self, level: LogLevel, line: &str) {
        self(level, line);
    }
}
