//! rtclog is the diagnostic logging facility of an RTC stack.
//!
//! It renders each message into a bounded line with optional fixed-width
//! decorations (date/time, thread, sender, level, indent, line ending) and
//! hands the line to a swappable sink. Lines never exceed the configured
//! buffer size; oversized bodies are truncated, decorations are not.
//!
//! The crate is structured into a few modules, each responsible for one
//! aspect of the facility.

/// Handles configuration loading and management.
pub mod config;
/// Line formatting, level filtering, sinks and the logging context.
pub mod log;
/// Start-up diagnostics: host info dump, byte order and line length checks.
pub mod selftest;
/// Host identification and the runtime byte-order probe.
pub mod sys_info;
