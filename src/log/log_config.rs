use crate::{
    config::{Config, ConfigError},
    log::{decoration_flags::DecorationFlags, layout::LineLayout, log_level::LogLevel},
};

/// Line buffer capacity; rendered lines are at most `DEFAULT_MAX_MESSAGE_SIZE - 1` bytes.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 4000;
/// Column width of the sender tag.
pub const DEFAULT_SENDER_WIDTH: usize = 22;
/// Column width of the thread name.
pub const DEFAULT_THREAD_WIDTH: usize = 12;
pub const DEFAULT_INDENT_SIZE: usize = 1;
pub const DEFAULT_INDENT_CHAR: char = '.';
/// Largest accepted `max_message_size` (1 MiB). The line buffer is reserved up front.
pub const MAX_MESSAGE_SIZE_LIMIT: usize = 1 << 20;
/// Section read by [`LogConfig::from_config`].
pub const LOGGING_SECTION: &str = "Logging";

/// Settings for a [`LogContext`](super::log_context::LogContext).
///
/// `threshold` and `decorations` are only initial values; both can be
/// changed on a running context. The widths and the buffer size are fixed
/// for the lifetime of the context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub threshold: LogLevel,
    pub decorations: DecorationFlags,
    pub max_message_size: usize,
    pub sender_width: usize,
    pub thread_width: usize,
    pub indent_size: usize,
    pub indent_char: char,
    /// Whether the default console sink colors lines by level.
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            threshold: LogLevel::Info,
            decorations: DecorationFlags::default(),
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            sender_width: DEFAULT_SENDER_WIDTH,
            thread_width: DEFAULT_THREAD_WIDTH,
            indent_size: DEFAULT_INDENT_SIZE,
            indent_char: DEFAULT_INDENT_CHAR,
            color: false,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn layout(&self) -> LineLayout {
        LineLayout {
            max_message_size: self.max_message_size,
            sender_width: self.sender_width,
            thread_width: self.thread_width,
            indent_size: self.indent_size,
        }
    }

    /// Checks that every decoration combination fits the line buffer.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidValue`] for a `max_message_size` above
    ///   [`MAX_MESSAGE_SIZE_LIMIT`], a width larger than the buffer, or a
    ///   non-ASCII indent character.
    /// - [`ConfigError::MessageSizeTooSmall`] when the widest decoration plus
    ///   the terminator byte exceeds `max_message_size`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_message_size > MAX_MESSAGE_SIZE_LIMIT {
            return Err(invalid("max_message_size", self.max_message_size));
        }
        for (key, width) in [
            ("sender_width", self.sender_width),
            ("thread_width", self.thread_width),
            ("indent_size", self.indent_size),
        ] {
            if width > self.max_message_size {
                return Err(invalid(key, width));
            }
        }

        let required = self
            .layout()
            .widest_decoration()
            .and_then(|w| w.checked_add(1))
            .unwrap_or(usize::MAX);
        if self.max_message_size < required {
            return Err(ConfigError::MessageSizeTooSmall {
                size: self.max_message_size,
                required,
            });
        }
        if !self.indent_char.is_ascii() {
            return Err(invalid("indent_char", self.indent_char));
        }
        Ok(())
    }

    /// Reads the `[Logging]` section of `config`, with global keys as fallback.
    ///
    /// Recognised keys: `level`, `decor`, `max_message_size`, `sender_width`,
    /// `thread_width`, `indent_size`, `indent_char`, `color`. Missing keys keep
    /// their defaults.
    ///
    /// # Errors
    /// Any unparsable value, or a combination rejected by [`validate`](Self::validate).
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut out = Self::default();
        let s = LOGGING_SECTION;

        if let Some(level) = config.lookup(s, "level") {
            out.threshold = level.parse()?;
        }
        if let Some(decor) = config.lookup(s, "decor") {
            out.decorations = decor.parse()?;
        }
        if let Some(v) = config.parse_value(s, "max_message_size")? {
            out.max_message_size = v;
        }
        if let Some(v) = config.parse_value(s, "sender_width")? {
            out.sender_width = v;
        }
        if let Some(v) = config.parse_value(s, "thread_width")? {
            out.thread_width = v;
        }
        if let Some(v) = config.parse_value(s, "indent_size")? {
            out.indent_size = v;
        }
        if let Some(v) = config.parse_value(s, "indent_char")? {
            out.indent_char = v;
        }
        if let Some(v) = config.parse_value(s, "color")? {
            out.color = v;
        }

        out.validate()?;
        Ok(out)
    }
}

fn invalid(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_owned(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        LogConfig::default().validate().unwrap();
    }

    #[test]
    fn reads_logging_section() {
        let cfg = Config::parse(
            "level = debug\n\
             [Logging]\n\
             decor = TIME | MICRO_SEC | NEWLINE\n\
             sender_width = 14\n\
             max_message_size = 512\n\
             indent_char = \"-\"\n\
             color = true\n",
        );
        let log = LogConfig::from_config(&cfg).unwrap();
        assert_eq!(
            log,
            LogConfig {
                threshold: LogLevel::Debug,
                decorations: DecorationFlags::TIME
                    | DecorationFlags::MICRO_SEC
                    | DecorationFlags::NEWLINE,
                max_message_size: 512,
                sender_width: 14,
                indent_char: '-',
                color: true,
                ..LogConfig::default()
            }
        );
    }

    #[test]
    fn empty_config_gives_defaults() {
        assert_eq!(
            LogConfig::from_config(&Config::empty()).unwrap(),
            LogConfig::default()
        );
    }

    #[test]
    fn rejects_buffer_smaller_than_decorations() {
        let cfg = Config::parse("[Logging]\nmax_message_size = 40\n");
        match LogConfig::from_config(&cfg) {
            Err(ConfigError::MessageSizeTooSmall { size, required }) => {
                assert_eq!(size, 40);
                assert_eq!(
                    Some(required),
                    LogConfig::default().layout().widest_decoration().map(|w| w + 1)
                );
            }
            other => panic!("expected MessageSizeTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_values() {
        for text in [
            "[Logging]\nlevel = chatty\n",
            "[Logging]\ndecor = TIME | SPARKLES\n",
            "[Logging]\nsender_width = -3\n",
            "[Logging]\ncolor = maybe\n",
            "[Logging]\nindent_char = ·\n",
        ] {
            assert!(
                LogConfig::from_config(&Config::parse(text)).is_err(),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn rejects_oversized_widths_without_overflow() {
        for (key, value) in [
            ("sender_width", "18446744073709551615"),
            ("thread_width", "18446744073709551615"),
            ("indent_size", "1152921504606846976"),
        ] {
            let cfg = Config::parse(&format!("[Logging]\n{key} = {value}\n"));
            match LogConfig::from_config(&cfg) {
                Err(ConfigError::InvalidValue { key: k, value: v }) => {
                    assert_eq!(k, key);
                    assert_eq!(v, value);
                }
                other => panic!("expected InvalidValue for {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn indent_larger_than_buffer_when_multiplied_is_rejected() {
        // Each width fits the buffer on its own; 32 indent levels do not.
        let config = LogConfig {
            max_message_size: MAX_MESSAGE_SIZE_LIMIT,
            indent_size: MAX_MESSAGE_SIZE_LIMIT,
            ..LogConfig::default()
        };
        match config.validate() {
            Err(ConfigError::MessageSizeTooSmall { size, required }) => {
                assert_eq!(size, MAX_MESSAGE_SIZE_LIMIT);
                assert!(required > MAX_MESSAGE_SIZE_LIMIT * 32);
            }
            other => panic!("expected MessageSizeTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn caps_the_line_buffer() {
        for size in [usize::MAX, MAX_MESSAGE_SIZE_LIMIT + 1] {
            let cfg = Config::parse(&format!("[Logging]\nmax_message_size = {size}\n"));
            assert!(
                matches!(
                    LogConfig::from_config(&cfg),
                    Err(ConfigError::InvalidValue { ref key, .. }) if key == "max_message_size"
                ),
                "accepted {size}"
            );
        }
        let cfg = Config::parse(&format!(
            "[Logging]\nmax_message_size = {MAX_MESSAGE_SIZE_LIMIT}\n"
        ));
        assert_eq!(
            LogConfig::from_config(&cfg).unwrap().max_message_size,
            MAX_MESSAGE_SIZE_LIMIT
        );
    }
}
