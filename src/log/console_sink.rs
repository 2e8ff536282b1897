use std::io::{self, Write};

use crate::log::{log_level::LogLevel, log_sink::LogSink};

const RESET: &str = "\x1b[0m";

/// Default sink: writes each line to standard error as-is.
///
/// With `color` enabled the line is wrapped in an ANSI color chosen by
/// level; a trailing newline stays outside the escape sequence so the
/// terminal is reset before the cursor moves on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    #[must_use]
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    #[must_use]
    pub const fn color(&self) -> bool {
        self.color
    }

    /// Writes `line` to `out`, colored if enabled. Errors are returned to the caller.
    pub fn write_line<W: Write>(&self, out: &mut W, level: LogLevel, line: &str) -> io::Result<()> {
        if !self.color || line.is_empty() {
            return out.write_all(line.as_bytes());
        }
        let (text, newline) = match line.strip_suffix('\n') {
            Some(text) => (text, "\n"),
            None => (line, ""),
        };
        write!(out, "{}{text}{RESET}{newline}", level_color(level))
    }
}

impl LogSink for ConsoleSink {
    fn log(&self, level: LogLevel, line: &str) {
        let stderr = io::stderr();
        let mut out = stderr.lock();
        let _ = self.write_line(&mut out, level, line);
    }
}

fn level_color(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Fatal | LogLevel::Error => "\x1b[1;31m",
        LogLevel::Warn => "\x1b[1;33m",
        LogLevel::Info => "\x1b[0;37m",
        LogLevel::Debug | LogLevel::Trace | LogLevel::Detail => "\x1b[0;90m",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn plain_output_is_verbatim() {
        let mut buf = Vec::new();
        ConsoleSink::new(false)
            .write_line(&mut buf, LogLevel::Error, "boom\n")
            .unwrap();
        assert_eq!(buf, b"boom\n");
    }

    #[test]
    fn color_resets_before_newline() {
        let mut buf = Vec::new();
        ConsoleSink::new(true)
            .write_line(&mut buf, LogLevel::Warn, "careful\n")
            .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\x1b[1;33mcareful\x1b[0m\n");
    }

    #[test]
    fn empty_line_writes_nothing() {
        let mut buf = Vec::new();
        ConsoleSink::new(true)
            .write_line(&mut buf, LogLevel::Info, "")
            .unwrap();
        assert!(buf.is_empty());
    }
}
