use std::collections::HashMap;
use std::fs;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while loading or validating logging configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid value {value:?} for key {key}")]
    InvalidValue { key: String, value: String },
    #[error("unknown log level: {0}")]
    UnknownLevel(String),
    #[error("invalid decorations: {0}")]
    InvalidDecorations(String),
    #[error("max message size {size} cannot hold {required} bytes of decoration and terminator")]
    MessageSizeTooSmall { size: usize, required: usize },
}

/// INI-style key/value configuration.
///
/// Lines are `key = value`, `[Section]` headers switch the current section,
/// `#` starts a comment line and values may be wrapped in double quotes.
/// Keys before the first header are globals.
#[derive(Debug, Default)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut config = Self::empty();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = &line[1..line.len() - 1];
                current_section = Some(name.trim().to_string());
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_string();
                let value = value.trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        config.globals.insert(key, value);
                    }
                    Some(sec) => {
                        config
                            .sections
                            .entry(sec.clone())
                            .or_default()
                            .insert(key, value);
                    }
                }
            }
        }
        config
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }

    /// Section value, then global value, skipping empty strings.
    #[must_use]
    pub fn lookup(&self, section: &str, key: &str) -> Option<&str> {
        self.get_non_empty(section, key)
            .or_else(|| self.get_global(key).filter(|s| !s.is_empty()))
    }

    /// Parses the value found by [`lookup`](Self::lookup).
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] when the value does not parse as `T`.
    pub fn parse_value<T: FromStr>(&self, section: &str, key: &str) -> Result<Option<T>, ConfigError> {
        self.lookup(section, key)
            .map(|raw| {
                raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_owned(),
                    value: raw.to_owned(),
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    const SAMPLE: &str = r#"
# global defaults
level = 4

[Logging]
sender_width = "16"
decor = TIME | NEWLINE
empty =
"#;

    #[test]
    fn sections_and_globals_are_split() {
        let cfg = Config::parse(SAMPLE);
        assert_eq!(cfg.get_global("level"), Some("4"));
        assert_eq!(cfg.get("Logging", "sender_width"), Some("16"));
        assert_eq!(cfg.get("Logging", "decor"), Some("TIME | NEWLINE"));
    }

    #[test]
    fn lookup_falls_back_to_globals_and_skips_empty() {
        let cfg = Config::parse(SAMPLE);
        assert_eq!(cfg.lookup("Logging", "level"), Some("4"));
        assert_eq!(cfg.lookup("Logging", "empty"), None);
        assert_eq!(cfg.lookup("Other", "sender_width"), None);
    }

    #[test]
    fn parse_value_reports_key_and_value() {
        let cfg = Config::parse("[Logging]\nmax_message_size = lots\n");
        match cfg.parse_value::<usize>("Logging", "max_message_size") {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, "max_message_size");
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
        assert_eq!(cfg.parse_value::<usize>("Logging", "absent").unwrap(), None);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("/nonexistent/rtclog.conf").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
