use std::fmt;

use crate::log::log_level::LogLevel;

/// A single emission request, borrowed from the caller for the duration of one call.
///
/// The message is kept as unexpanded [`fmt::Arguments`] so the formatter can
/// write it straight into the bounded line buffer.
#[derive(Clone, Copy, Debug)]
pub struct LogRecord<'a> {
    /// The severity level of the message.
    pub level: LogLevel,
    /// Short tag naming the origin, usually a file or component name. May be empty.
    pub sender: &'a str,
    /// The message body.
    pub args: fmt::Arguments<'a>,
}

impl<'a> LogRecord<'a> {
    /// Creates a new `LogRecord`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rtclog::log::{log_level::LogLevel, log_record::LogRecord};
    ///
    /// let sender = LogRecord::new(LogLevel::Info, "sdp.rs", format_args!("offer {}", 3)).sender;
    /// assert_eq!(sender, "sdp.rs");
    /// ```
    #[must_use]
    pub fn new(level: LogLevel, sender: &'a str, args: fmt::Arguments<'a>) -> Self {
        Self {
            level,
            sender,
            args,
        }
    }
}
