use std::fmt::{self, Write as _};
use std::thread;

use crate::log::{
    decoration_flags::DecorationFlags, layout::LineLayout, log_record::LogRecord,
    timestamp::Timestamp,
};

/// Renders a [`LogRecord`] plus its decorations into a bounded line.
///
/// Output order is date/time group, thread, sender, level label, indent,
/// body, `\r`, `\n`. Every decoration has the fixed width computed by
/// [`LineLayout`]; when the line would not fit in
/// `max_message_size - 1` bytes only the body is shortened.
#[derive(Clone, Copy, Debug)]
pub struct LineFormatter {
    layout: LineLayout,
    indent_char: char,
}

impl LineFormatter {
    /// `indent_char` must be ASCII so each indent level has the configured
    /// byte width; [`LogConfig::validate`](super::log_config::LogConfig::validate)
    /// rejects anything else.
    #[must_use]
    pub fn new(layout: LineLayout, indent_char: char) -> Self {
        debug_assert!(indent_char.is_ascii(), "non-ASCII indent char {indent_char:?}");
        Self {
            layout,
            indent_char,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &LineLayout {
        &self.layout
    }

    /// Clears `out` and renders the line into it. Returns the line length.
    pub fn render(
        &self,
        out: &mut String,
        record: &LogRecord<'_>,
        flags: DecorationFlags,
        indent_depth: usize,
        ts: &Timestamp,
    ) -> usize {
        out.clear();

        render_date_time(out, flags, ts);

        if flags.contains(DecorationFlags::THREAD_ID) {
            let current = thread::current();
            match current.name() {
                Some(name) => push_left_aligned(out, name, self.layout.thread_width),
                None => {
                    let id = format!("{:?}", current.id());
                    push_left_aligned(out, &id, self.layout.thread_width);
                }
            }
            out.push(' ');
        }

        if flags.contains(DecorationFlags::SENDER) {
            push_right_aligned(out, record.sender, self.layout.sender_width);
            out.push(' ');
        }

        if flags.contains(DecorationFlags::LEVEL_TEXT) {
            out.push_str(record.level.label());
            out.push(' ');
        }

        for _ in 0..self.layout.indent_width(flags, indent_depth) {
            out.push(self.indent_char);
        }

        let mut body = BoundedWriter {
            out: &mut *out,
            remaining: self.layout.body_budget(flags, indent_depth),
        };
        let _ = fmt::write(&mut body, record.args);

        if flags.contains(DecorationFlags::CR) {
            out.push('\r');
        }
        if flags.contains(DecorationFlags::NEWLINE) {
            out.push('\n');
        }

        debug_assert!(out.len() <= self.layout.max_line_len());
        out.len()
    }

    /// Renders into a new `String` sized for the longest possible line.
    #[must_use]
    pub fn render_to_string(
        &self,
        record: &LogRecord<'_>,
        flags: DecorationFlags,
        indent_depth: usize,
        ts: &Timestamp,
    ) -> String {
        let mut out = String::with_capacity(self.layout.max_message_size);
        self.render(&mut out, record, flags, indent_depth, ts);
        out
    }
}

fn render_date_time(out: &mut String, flags: DecorationFlags, ts: &Timestamp) {
    if !flags.intersects(DecorationFlags::DATE_TIME) {
        return;
    }

    let mut first = true;
    let mut after_date = false;
    let mut separate = |out: &mut String, is_date: bool| {
        if !first {
            out.push(if after_date && is_date { '-' } else { ' ' });
        }
        first = false;
        after_date = is_date;
    };

    if flags.contains(DecorationFlags::DAY_NAME) {
        separate(out, false);
        out.push_str(ts.day_name());
    }
    if flags.contains(DecorationFlags::YEAR) {
        separate(out, true);
        let _ = write!(out, "{:04}", ts.year_4());
    }
    if flags.contains(DecorationFlags::MONTH) {
        separate(out, true);
        let _ = write!(out, "{:02}", ts.mon % 100);
    }
    if flags.contains(DecorationFlags::DAY_OF_MON) {
        separate(out, true);
        let _ = write!(out, "{:02}", ts.day % 100);
    }
    if flags.contains(DecorationFlags::TIME) {
        separate(out, false);
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}",
            ts.hour % 100,
            ts.min % 100,
            ts.sec % 100
        );
    }
    if flags.contains(DecorationFlags::MICRO_SEC) {
        let _ = write!(out, ".{:03}", ts.msec % 1_000);
    }
    out.push(' ');
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a char.
fn clip(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    &s[..cut]
}

fn push_left_aligned(out: &mut String, s: &str, width: usize) {
    let s = clip(s, width);
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', width - s.len()));
}

fn push_right_aligned(out: &mut String, s: &str, width: usize) {
    let s = clip(s, width);
    out.extend(std::iter::repeat_n(' ', width - s.len()));
    out.push_str(s);
}

/// `fmt::Write` adapter that silently drops everything past its budget.
struct BoundedWriter<'a> {
    out: &'a mut String,
    remaining: usize,
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if s.len() <= self.remaining {
            self.out.push_str(s);
            self.remaining -= s.len();
        } else {
            self.out.push_str(clip(s, self.remaining));
            // Once cut, later short fragments must not slip in behind the gap.
            self.remaining = 0;
        }
        Ok(())
    }
}
