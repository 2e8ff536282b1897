use std::{fmt, str::FromStr};

use crate::config::ConfigError;

/// Defines the severity levels for log messages.
///
/// Lower numbers are more severe. A message is emitted when its numeric
/// level is less than or equal to the context threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    /// Unrecoverable condition; always compiled in.
    Fatal = 0,
    /// Designates error events that might still allow the application to continue running.
    Error = 1,
    /// Designates potentially harmful situations.
    Warn = 2,
    /// Designates informational messages that highlight the progress of the application at coarse-grained level.
    Info = 3,
    /// Designates fine-grained informational events that are most useful to debug an application.
    Debug = 4,
    /// Designates very fine-grained informational events.
    Trace = 5,
    /// Packet dumps and other very noisy detail.
    Detail = 6,
}

impl LogLevel {
    /// Every level, most severe first.
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
        LogLevel::Detail,
    ];

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Fixed six-character label used by the `LEVEL_TEXT` decoration.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            LogLevel::Fatal => "FATAL:",
            LogLevel::Error => "ERROR:",
            LogLevel::Warn => " WARN:",
            LogLevel::Info => " INFO:",
            LogLevel::Debug => "DEBUG:",
            LogLevel::Trace => "TRACE:",
            LogLevel::Detail => "DETRC:",
        }
    }

    /// Levels above the last one saturate to `Detail`.
    #[must_use]
    pub const fn from_u8_saturating(raw: u8) -> Self {
        match raw {
            0 => LogLevel::Fatal,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Detail,
        }
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ConfigError;

    fn try_from(raw: u8) -> Result<Self, ConfigError> {
        if usize::from(raw) < LogLevel::ALL.len() {
            Ok(LogLevel::from_u8_saturating(raw))
        } else {
            Err(ConfigError::UnknownLevel(raw.to_string()))
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    /// Accepts a level name (case-insensitive) or its number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(raw) = s.parse::<u8>() {
            return LogLevel::try_from(raw);
        }
        match s.to_ascii_lowercase().as_str() {
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            "detail" => Ok(LogLevel::Detail),
            _ => Err(ConfigError::UnknownLevel(s.to_owned())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().trim_start().trim_end_matches(':'))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn labels_share_one_width() {
        for level in LogLevel::ALL {
            assert_eq!(level.label().len(), 6, "{level:?}");
        }
    }

    #[test]
    fn parses_names_and_numbers() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(" INFO ".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("5".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert!("7".parse::<LogLevel>().is_err());
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn ordering_follows_severity_numbers() {
        assert!(LogLevel::Fatal < LogLevel::Error);
        assert!(LogLevel::Debug < LogLevel::Detail);
        assert_eq!(LogLevel::from_u8_saturating(200), LogLevel::Detail);
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
    }
}
