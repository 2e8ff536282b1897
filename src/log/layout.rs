//! Fixed-width decoration arithmetic.
//!
//! Everything here is pure: given the active flags, the configured widths
//! and the body length, these functions return the exact rendered length
//! without formatting anything. The [`LineFormatter`](super::line_formatter::LineFormatter)
//! is required to produce lines of exactly these lengths.

use crate::log::decoration_flags::DecorationFlags;

/// `Sun`
pub const DAY_NAME_WIDTH: usize = 3;
/// `2026`
pub const YEAR_WIDTH: usize = 4;
/// `10`
pub const MONTH_WIDTH: usize = 2;
/// `18`
pub const DAY_OF_MON_WIDTH: usize = 2;
/// `HH:MM:SS`
pub const TIME_WIDTH: usize = 8;
/// `.mmm`, dot included.
pub const MICRO_SEC_WIDTH: usize = 4;
/// See [`LogLevel::label`](super::log_level::LogLevel::label).
pub const LEVEL_TEXT_WIDTH: usize = 6;
/// Indentation deeper than this renders as this depth.
pub const MAX_INDENT_DEPTH: usize = 32;

/// Date/time parts that take a separator when they are not first.
const SEPARATED_PARTS: [(DecorationFlags, usize); 5] = [
    (DecorationFlags::DAY_NAME, DAY_NAME_WIDTH),
    (DecorationFlags::YEAR, YEAR_WIDTH),
    (DecorationFlags::MONTH, MONTH_WIDTH),
    (DecorationFlags::DAY_OF_MON, DAY_OF_MON_WIDTH),
    (DecorationFlags::TIME, TIME_WIDTH),
];

/// Width of the date/time group including its separators and closing space.
///
/// `TIME | MICRO_SEC` is 13.
#[must_use]
pub fn date_time_width(flags: DecorationFlags) -> usize {
    let mut parts: usize = 0;
    let mut width = 0;
    for (flag, part_width) in SEPARATED_PARTS {
        if flags.contains(flag) {
            width += part_width;
            parts += 1;
        }
    }
    width += parts.saturating_sub(1);
    if flags.contains(DecorationFlags::MICRO_SEC) {
        width += MICRO_SEC_WIDTH;
    }
    if width > 0 {
        width += 1;
    }
    width
}

/// Width of the fields that follow the message body.
#[must_use]
pub fn suffix_width(flags: DecorationFlags) -> usize {
    usize::from(flags.contains(DecorationFlags::CR))
        + usize::from(flags.contains(DecorationFlags::NEWLINE))
}

/// Widths that do not depend on the flags of a single line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineLayout {
    /// Capacity of the line buffer; rendered lines are at most one byte shorter.
    pub max_message_size: usize,
    pub sender_width: usize,
    pub thread_width: usize,
    /// Characters per indentation level.
    pub indent_size: usize,
}

impl LineLayout {
    /// Longest line the formatter will ever hand to a sink.
    #[must_use]
    pub const fn max_line_len(&self) -> usize {
        self.max_message_size.saturating_sub(1)
    }

    #[must_use]
    pub fn indent_width(&self, flags: DecorationFlags, indent_depth: usize) -> usize {
        if flags.contains(DecorationFlags::INDENT) {
            indent_depth.min(MAX_INDENT_DEPTH) * self.indent_size
        } else {
            0
        }
    }

    /// Width of everything rendered before the body.
    #[must_use]
    pub fn prefix_width(&self, flags: DecorationFlags, indent_depth: usize) -> usize {
        let mut width = date_time_width(flags);
        if flags.contains(DecorationFlags::THREAD_ID) {
            width += self.thread_width + 1;
        }
        if flags.contains(DecorationFlags::SENDER) {
            width += self.sender_width + 1;
        }
        if flags.contains(DecorationFlags::LEVEL_TEXT) {
            width += LEVEL_TEXT_WIDTH + 1;
        }
        width + self.indent_width(flags, indent_depth)
    }

    /// Total decoration width around the body.
    #[must_use]
    pub fn decoration_width(&self, flags: DecorationFlags, indent_depth: usize) -> usize {
        self.prefix_width(flags, indent_depth) + suffix_width(flags)
    }

    /// Bytes left for the body once decorations are placed.
    #[must_use]
    pub fn body_budget(&self, flags: DecorationFlags, indent_depth: usize) -> usize {
        self.max_line_len()
            .saturating_sub(self.decoration_width(flags, indent_depth))
    }

    /// Length of the line rendered for a body of `body_len` bytes.
    ///
    /// Truncation only ever shortens the body.
    #[must_use]
    pub fn rendered_len(&self, flags: DecorationFlags, indent_depth: usize, body_len: usize) -> usize {
        self.decoration_width(flags, indent_depth)
            + body_len.min(self.body_budget(flags, indent_depth))
    }

    /// Widest decoration any flag combination and indent depth can produce.
    ///
    /// `None` when the configured widths overflow `usize`.
    #[must_use]
    pub fn widest_decoration(&self) -> Option<usize> {
        let all = DecorationFlags::all();
        let fixed = date_time_width(all) + LEVEL_TEXT_WIDTH + 1 + suffix_width(all);
        self.thread_width
            .checked_add(1)?
            .checked_add(self.sender_width.checked_add(1)?)?
            .checked_add(MAX_INDENT_DEPTH.checked_mul(self.indent_size)?)?
            .checked_add(fixed)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const LAYOUT: LineLayout = LineLayout {
        max_message_size: 4000,
        sender_width: 22,
        thread_width: 12,
        indent_size: 1,
    };

    #[test_case(DecorationFlags::empty(), 0; "none")]
    #[test_case(DecorationFlags::TIME, 9; "time only")]
    #[test_case(DecorationFlags::TIME | DecorationFlags::MICRO_SEC, 13; "time with millis")]
    #[test_case(DecorationFlags::MICRO_SEC, 5; "millis only")]
    #[test_case(DecorationFlags::YEAR | DecorationFlags::MONTH | DecorationFlags::DAY_OF_MON, 11; "date")]
    #[test_case(DecorationFlags::DATE_TIME, 28; "full date and time")]
    fn date_time_group_width(flags: DecorationFlags, expected: usize) {
        assert_eq!(date_time_width(flags), expected);
    }

    #[test]
    fn full_default_decoration() {
        let flags = DecorationFlags::TIME
            | DecorationFlags::MICRO_SEC
            | DecorationFlags::SENDER
            | DecorationFlags::NEWLINE;
        assert_eq!(LAYOUT.decoration_width(flags, 0), 13 + 22 + 1 + 1);
        assert_eq!(LAYOUT.rendered_len(flags, 0, 12), 13 + 22 + 1 + 12 + 1);
    }

    #[test]
    fn newline_only_adds_one() {
        assert_eq!(LAYOUT.rendered_len(DecorationFlags::NEWLINE, 0, 0), 1);
        assert_eq!(LAYOUT.rendered_len(DecorationFlags::NEWLINE, 0, 12), 13);
        assert_eq!(LAYOUT.rendered_len(DecorationFlags::empty(), 0, 0), 0);
    }

    #[test]
    fn oversized_body_saturates() {
        for bits in 0..=DecorationFlags::all().bits() {
            let flags = DecorationFlags::from_bits_truncate(bits);
            assert_eq!(
                LAYOUT.rendered_len(flags, 3, LAYOUT.max_line_len()),
                LAYOUT.max_line_len(),
                "{flags:?}"
            );
        }
    }

    #[test]
    fn indent_only_counts_with_flag_and_is_capped() {
        assert_eq!(LAYOUT.indent_width(DecorationFlags::empty(), 5), 0);
        assert_eq!(LAYOUT.indent_width(DecorationFlags::INDENT, 5), 5);
        assert_eq!(
            LAYOUT.indent_width(DecorationFlags::INDENT, 1000),
            MAX_INDENT_DEPTH
        );
    }

    #[test]
    fn widest_decoration_adds_every_field() {
        let expected = 28 + (12 + 1) + (22 + 1) + (6 + 1) + MAX_INDENT_DEPTH + 2;
        assert_eq!(LAYOUT.widest_decoration(), Some(expected));
        assert_eq!(
            Some(LAYOUT.decoration_width(DecorationFlags::all(), MAX_INDENT_DEPTH)),
            LAYOUT.widest_decoration()
        );
    }

    #[test]
    fn widest_decoration_reports_overflow() {
        for layout in [
            LineLayout { sender_width: usize::MAX, ..LAYOUT },
            LineLayout { thread_width: usize::MAX - 1, ..LAYOUT },
            LineLayout { indent_size: 1 << 60, ..LAYOUT },
        ] {
            assert_eq!(layout.widest_decoration(), None, "{layout:?}");
        }
    }
}
