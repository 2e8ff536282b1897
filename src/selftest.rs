//! Diagnostic probes run at start-up or from the `rtclog_selftest` binary.
//!
//! [`os_test`] dumps the host identification and checks the byte order;
//! [`log_length_test`] drives a context through a table of decoration sets
//! and bodies and checks the exact length each line reaches the sink with.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    log::{
        capturing_sink::CapturingSink, decoration_flags::DecorationFlags, log_config::LogConfig,
        log_context::LogContext, log_level::LogLevel,
    },
    log_info,
    sys_info::{
        endianness::{self, ByteOrder, EndianError},
        sys_info::get_sys_info,
    },
};

const SENDER: &str = "selftest";

#[derive(Debug, Error)]
pub enum SelfTestError {
    #[error(transparent)]
    Endian(#[from] EndianError),
    #[error("test {index} ({title}): expecting len={expected}, got {got:?}")]
    LengthMismatch {
        index: usize,
        title: &'static str,
        expected: usize,
        got: Option<usize>,
    },
}

/// Body emitted by a [`LengthCase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseBody {
    /// `"Hello {}!"` with `"world"`, 12 bytes.
    Greeting,
    Empty,
    /// `max_message_size - 1` filler characters.
    Filler,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthCase {
    pub title: &'static str,
    pub decorations: DecorationFlags,
    pub body: CaseBody,
    pub expected: usize,
}

/// The length table for `config`.
///
/// Widths: `TIME | MICRO_SEC` is 13, `SENDER` is `sender_width + 1`,
/// `"Hello world!"` is 12 and `NEWLINE` is 1.
#[must_use]
pub fn length_cases(config: &LogConfig) -> Vec<LengthCase> {
    let normal = DecorationFlags::TIME
        | DecorationFlags::MICRO_SEC
        | DecorationFlags::SENDER
        | DecorationFlags::NEWLINE;
    let none = DecorationFlags::empty();
    let newline = DecorationFlags::NEWLINE;
    let sender = config.sender_width + 1;
    let full = config.max_message_size - 1;

    let case = |title: &'static str, decorations, body, expected| LengthCase {
        title,
        decorations,
        body,
        expected,
    };
    vec![
        case("normal log", normal, CaseBody::Greeting, 13 + sender + 12 + 1),
        case("normal log with no decor", none, CaseBody::Greeting, 12),
        case("normal log with just newline", newline, CaseBody::Greeting, 13),
        case("empty string with normal decor", normal, CaseBody::Empty, 13 + sender + 1),
        case("empty string with nodecor", none, CaseBody::Empty, 0),
        case("empty string with just newline", newline, CaseBody::Empty, 1),
        case("large message with normal decor", normal, CaseBody::Filler, full),
        case("large message with no decor", none, CaseBody::Filler, full),
        case("large message with just newline", newline, CaseBody::Filler, full),
    ]
}

/// Runs [`length_cases`] against `ctx`.
///
/// The context's sink and decorations are swapped for the duration of the
/// run and restored before returning, on failure as well.
///
/// # Errors
/// [`SelfTestError::LengthMismatch`] for the first case whose line length differs.
pub fn log_length_test(ctx: &LogContext) -> Result<(), SelfTestError> {
    let capture = Arc::new(CapturingSink::new());
    let old_sink = ctx.set_sink(Some(capture.clone()));
    let old_decor = ctx.decorations();
    let filler = "A".repeat(ctx.config().max_message_size - 1);

    let mut result = Ok(());
    for (index, case) in length_cases(ctx.config()).into_iter().enumerate() {
        capture.take();
        ctx.set_decorations(case.decorations);
        match case.body {
            CaseBody::Greeting => {
                ctx.emit(LogLevel::Fatal, SENDER, format_args!("Hello {}!", "world"));
            }
            CaseBody::Empty => ctx.emit(LogLevel::Fatal, SENDER, format_args!("{}", "")),
            CaseBody::Filler => ctx.emit(LogLevel::Fatal, SENDER, format_args!("{filler}")),
        }

        let got = capture.last_len();
        if got != Some(case.expected) {
            result = Err(SelfTestError::LengthMismatch {
                index,
                title: case.title,
                expected: case.expected,
                got,
            });
            break;
        }
    }

    ctx.set_sink(Some(old_sink));
    ctx.set_decorations(old_decor);
    result
}

/// Logs the host identification, then verifies the configured byte order.
///
/// # Errors
/// [`SelfTestError::Endian`] when the runtime layout contradicts the build.
pub fn os_test(ctx: &LogContext) -> Result<(), SelfTestError> {
    let si = get_sys_info();
    log_info!(ctx, "", " Sys info:");
    log_info!(ctx, "", "   machine:  {}", si.machine);
    log_info!(ctx, "", "   os_name:  {}", si.os_name);
    log_info!(ctx, "", "   os_ver:   {:#x}", si.os_ver);
    log_info!(ctx, "", "   sdk_name: {}", si.sdk_name);
    log_info!(ctx, "", "   sdk_ver:  {:#x}", si.sdk_ver);
    log_info!(ctx, "", "   info:     {}", si.info);

    log_info!(ctx, "", " Testing endianness..");
    log_info!(ctx, "", "   Library is set to {}", ByteOrder::configured());
    endianness::probe()?;
    Ok(())
}

/// [`os_test`] followed by [`log_length_test`].
///
/// # Errors
/// The first failure of either.
pub fn run_all(ctx: &LogContext) -> Result<(), SelfTestError> {
    os_test(ctx)?;
    log_length_test(ctx)
}
