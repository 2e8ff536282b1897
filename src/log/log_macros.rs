//! Leveled logging macros over a [`LogContext`](crate::log::log_context::LogContext).
//!
//! Every macro takes `(ctx, sender, format, args...)`, where `ctx` is anything
//! that derefs to a `LogContext` (a reference, an `Arc`, ...).
//!
//! # Feature Flags
//! The compile-time ceiling is controlled by cargo features:
//! `log-detail`, `log-trace`, `log-debug`, `log-info`, `log-warn`, `log-error`.
//!
//! If a feature is disabled, the corresponding macro expands to `()`, removing
//! all formatting overhead at compile time. `log_fatal!` is always available.
//! The runtime threshold of the context still applies to everything compiled in.

// ============================================================================
// 1. GENERIC MACRO
// ============================================================================

#[macro_export]
macro_rules! log_at {
    ($ctx:expr, $lvl:expr, $sender:expr, $($arg:tt)*) => {{
        $ctx.emit($lvl, $sender, format_args!($($arg)*));
    }};
}

// ============================================================================
// 2. LEVEL-SPECIFIC MACROS (Feature Gated)
// ============================================================================

// ---------------------- FATAL ----------------------
#[macro_export]
macro_rules! log_fatal { ($ctx:expr, $sender:expr, $($arg:tt)*) => { $crate::log_at!($ctx, $crate::log::log_level::LogLevel::Fatal, $sender, $($arg)*) } }

// ---------------------- ERROR ----------------------
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! log_error { ($ctx:expr, $sender:expr, $($arg:tt)*) => { $crate::log_at!($ctx, $crate::log::log_level::LogLevel::Error, $sender, $($arg)*) } }

#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- WARN ----------------------
#[cfg(feature = "log-warn")]
#[macro_export]
macro_rules! log_warn { ($ctx:expr, $sender:expr, $($arg:tt)*) => { $crate::log_at!($ctx, $crate::log::log_level::LogLevel::Warn, $sender, $($arg)*) } }

#[cfg(not(feature = "log-warn"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- INFO ----------------------
#[cfg(feature = "log-info")]
#[macro_export]
macro_rules! log_info { ($ctx:expr, $sender:expr, $($arg:tt)*) => { $crate::log_at!($ctx, $crate::log::log_level::LogLevel::Info, $sender, $($arg)*) } }

#[cfg(not(feature = "log-info"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- DEBUG ----------------------
#[cfg(feature = "log-debug")]
#[macro_export]
macro_rules! log_debug { ($ctx:expr, $sender:expr, $($arg:tt)*) => { $crate::log_at!($ctx, $crate::log::log_level::LogLevel::Debug, $sender, $($arg)*) } }

#[cfg(not(feature = "log-debug"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- TRACE ----------------------
#[cfg(feature = "log-trace")]
#[macro_export]
macro_rules! log_trace { ($ctx:expr, $sender:expr, $($arg:tt)*) => { $crate::log_at!($ctx, $crate::log::log_level::LogLevel::Trace, $sender, $($arg)*) } }

#[cfg(not(feature = "log-trace"))]
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- DETAIL ----------------------
#[cfg(feature = "log-detail")]
#[macro_export]
macro_rules! log_detail { ($ctx:expr, $sender:expr, $($arg:tt)*) => { $crate::log_at!($ctx, $crate::log::log_level::LogLevel::Detail, $sender, $($arg)*) } }

#[cfg(not(feature = "log-detail"))]
#[macro_export]
macro_rules! log_detail {
    ($($arg:tt)*) => {
        ()
    };
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use crate::log::{
        capturing_sink::CapturingSink, decoration_flags::DecorationFlags, log_config::LogConfig,
        log_context::LogContext, log_level::LogLevel,
    };
    use std::sync::Arc;

    #[test]
    fn macros_format_and_respect_threshold() {
        let capture = Arc::new(CapturingSink::new());
        let ctx = Arc::new(
            LogContext::with_default_sink(
                LogConfig {
                    threshold: LogLevel::Warn,
                    decorations: DecorationFlags::LEVEL_TEXT,
                    ..LogConfig::default()
                },
                capture.clone(),
            )
            .unwrap(),
        );

        crate::log_fatal!(ctx, "m", "code {}", 7);
        crate::log_warn!(&ctx, "m", "x={x}", x = 1);
        crate::log_info!(ctx, "m", "not shown");
        crate::log_at!(ctx, LogLevel::Error, "m", "direct");

        let lines: Vec<String> = capture.take().into_iter().map(|l| l.text).collect();
        assert_eq!(lines, vec!["FATAL: code 7", " WARN: x=1", "ERROR: direct"]);
    }
}
