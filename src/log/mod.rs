pub mod capturing_sink;
pub mod channel_sink;
pub mod console_sink;
pub mod decoration_flags;
pub mod layout;
pub mod level_filter;
pub mod line_formatter;
pub mod log_config;
pub mod log_context;
pub mod log_level;
pub mod log_macros;
pub mod log_record;
pub mod log_sink;
pub mod null_sink;
pub mod sink_registry;
pub mod timestamp;

pub use capturing_sink::CapturingSink;
pub use console_sink::ConsoleSink;
pub use decoration_flags::DecorationFlags;
pub use log_config::LogConfig;
pub use log_context::LogContext;
pub use log_level::LogLevel;
pub use log_sink::LogSink;
pub use null_sink::NullSink;
