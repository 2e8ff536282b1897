use std::str::FromStr;

use bitflags::bitflags;

use crate::config::ConfigError;

bitflags! {
    /// Optional fields rendered around a log message body.
    ///
    /// Flags are orthogonal: any subset is valid and no flag implies another.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DecorationFlags: u32 {
        /// Abbreviated weekday name, e.g. `Sun`.
        const DAY_NAME = 1 << 0;
        /// Four-digit year.
        const YEAR = 1 << 1;
        /// Two-digit month.
        const MONTH = 1 << 2;
        /// Two-digit day of month.
        const DAY_OF_MON = 1 << 3;
        /// `HH:MM:SS`.
        const TIME = 1 << 4;
        /// `.mmm` sub-second part.
        const MICRO_SEC = 1 << 5;
        /// Current thread name, fixed width.
        const THREAD_ID = 1 << 6;
        /// Sender tag, fixed width.
        const SENDER = 1 << 7;
        /// Six-character level label.
        const LEVEL_TEXT = 1 << 8;
        /// Per-thread indentation.
        const INDENT = 1 << 9;
        /// Trailing carriage return.
        const CR = 1 << 10;
        /// Trailing newline.
        const NEWLINE = 1 << 11;
    }
}

impl DecorationFlags {
    /// Parts of the date/time group, in rendering order.
    pub const DATE_TIME: Self = Self::DAY_NAME
        .union(Self::YEAR)
        .union(Self::MONTH)
        .union(Self::DAY_OF_MON)
        .union(Self::TIME)
        .union(Self::MICRO_SEC);
}

impl Default for DecorationFlags {
    fn default() -> Self {
        Self::TIME | Self::MICRO_SEC | Self::SENDER | Self::NEWLINE | Self::INDENT
    }
}

impl FromStr for DecorationFlags {
    type Err = ConfigError;

    /// Accepts `TIME | SENDER` style expressions, a decimal number or a
    /// `0x` prefixed hex number. Unknown bits are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let numeric = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => Some(u32::from_str_radix(hex, 16)),
            None if s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty() => Some(s.parse()),
            None => None,
        };
        match numeric {
            Some(Ok(bits)) => Self::from_bits(bits)
                .ok_or_else(|| ConfigError::InvalidDecorations(format!("unknown bits in {s}"))),
            Some(Err(e)) => Err(ConfigError::InvalidDecorations(e.to_string())),
            None => bitflags::parser::from_str::<Self>(s)
                .map_err(|e| ConfigError::InvalidDecorations(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn parses_flag_expressions() {
        let flags: DecorationFlags = "TIME | MICRO_SEC | NEWLINE".parse().unwrap();
        assert_eq!(
            flags,
            DecorationFlags::TIME | DecorationFlags::MICRO_SEC | DecorationFlags::NEWLINE
        );
        assert_eq!("".parse::<DecorationFlags>().unwrap(), DecorationFlags::empty());
    }

    #[test]
    fn parses_numbers() {
        assert_eq!("2048".parse::<DecorationFlags>().unwrap(), DecorationFlags::NEWLINE);
        assert_eq!("0x80".parse::<DecorationFlags>().unwrap(), DecorationFlags::SENDER);
        assert!("0x10000".parse::<DecorationFlags>().is_err());
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("TIME | COLOUR".parse::<DecorationFlags>().is_err());
    }
}
