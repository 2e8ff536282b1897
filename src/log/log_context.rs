use std::cell::{Cell, RefCell};
use std::fmt;
use std::sync::{
    Arc,
    atomic::{AtomicU8, AtomicU32, Ordering},
};

use crate::{
    config::ConfigError,
    log::{
        console_sink::ConsoleSink, decoration_flags::DecorationFlags, level_filter::LevelFilter,
        line_formatter::LineFormatter, log_config::LogConfig, log_level::LogLevel,
        log_record::LogRecord, log_sink::LogSink, sink_registry::SinkRegistry,
        timestamp::Timestamp,
    },
};

thread_local! {
    static LINE_BUF: RefCell<String> = const { RefCell::new(String::new()) };
    static INDENT: Cell<usize> = const { Cell::new(0) };
}

/// Lifecycle of a [`LogContext`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FacilityState {
    /// Built, nothing emitted yet.
    Configured = 0,
    /// At least one line delivered since the last (re)configuration.
    Running = 1,
    /// Threshold, decorations or sink changed since the last delivery.
    Reconfigured = 2,
    /// Default sink restored; emissions are dropped.
    Shutdown = 3,
}

impl FacilityState {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => FacilityState::Configured,
            1 => FacilityState::Running,
            2 => FacilityState::Reconfigured,
            _ => FacilityState::Shutdown,
        }
    }
}

/// The logging facility owned by the host application.
///
/// Holds the threshold, the active decorations and the sink registry, and
/// is the only way to emit a line. Share it behind an `Arc`; every method
/// takes `&self`.
///
/// Threshold, decorations and sink are read independently on each emission.
/// A line racing with a reconfiguration may be rendered with the old
/// decorations and delivered to the new sink, or the other way around.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use rtclog::log::{
///     capturing_sink::CapturingSink, decoration_flags::DecorationFlags,
///     log_config::LogConfig, log_context::LogContext, log_level::LogLevel,
/// };
///
/// let ctx = LogContext::new(LogConfig::default()).unwrap();
/// let capture = Arc::new(CapturingSink::new());
/// let previous = ctx.set_sink(Some(capture.clone()));
/// ctx.set_decorations(DecorationFlags::NEWLINE);
///
/// ctx.emit(LogLevel::Info, "os.c", format_args!("Hello {}!", "world"));
/// assert_eq!(capture.last_len(), Some(13));
///
/// ctx.set_sink(Some(previous));
/// ```
pub struct LogContext {
    config: LogConfig,
    formatter: LineFormatter,
    filter: LevelFilter,
    decorations: AtomicU32,
    sinks: SinkRegistry,
    state: AtomicU8,
}

impl LogContext {
    /// Builds a context whose default sink is a [`ConsoleSink`].
    ///
    /// # Errors
    /// Whatever [`LogConfig::validate`] rejects.
    pub fn new(config: LogConfig) -> Result<Self, ConfigError> {
        let default = Arc::new(ConsoleSink::new(config.color));
        Self::with_default_sink(config, default)
    }

    /// Builds a context with a custom default sink.
    ///
    /// # Errors
    /// Whatever [`LogConfig::validate`] rejects.
    pub fn with_default_sink(
        config: LogConfig,
        default_sink: Arc<dyn LogSink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            formatter: LineFormatter::new(config.layout(), config.indent_char),
            filter: LevelFilter::new(config.threshold),
            decorations: AtomicU32::new(config.decorations.bits()),
            sinks: SinkRegistry::new(default_sink),
            state: AtomicU8::new(FacilityState::Configured as u8),
            config,
        })
    }

    /// The configuration the context was built with.
    #[must_use]
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    #[must_use]
    pub fn formatter(&self) -> &LineFormatter {
        &self.formatter
    }

    /// Renders and delivers one line if `level` passes the threshold.
    pub fn emit(&self, level: LogLevel, sender: &str, args: fmt::Arguments<'_>) {
        if !self.filter.enabled(level) || self.state() == FacilityState::Shutdown {
            return;
        }
        let record = LogRecord::new(level, sender, args);
        let flags = self.decorations();
        let ts = if flags.intersects(DecorationFlags::DATE_TIME) {
            Timestamp::now()
        } else {
            Timestamp::from_unix(std::time::Duration::ZERO)
        };
        let indent = INDENT.with(Cell::get);

        with_line_buffer(self.config.max_message_size, |buf| {
            self.formatter.render(buf, &record, flags, indent, &ts);
            self.sinks.dispatch(level, buf);
        });

        self.mark_running();
    }

    /// [`emit`](Self::emit) for an already formatted message.
    pub fn emit_str(&self, level: LogLevel, sender: &str, message: &str) {
        self.emit(level, sender, format_args!("{message}"));
    }

    #[must_use]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.filter.enabled(level)
    }

    pub fn set_threshold(&self, level: LogLevel) {
        self.filter.set_threshold(level);
        self.mark_reconfigured();
    }

    #[must_use]
    pub fn threshold(&self) -> LogLevel {
        self.filter.threshold()
    }

    pub fn set_decorations(&self, flags: DecorationFlags) {
        self.decorations.store(flags.bits(), Ordering::Relaxed);
        self.mark_reconfigured();
    }

    #[must_use]
    pub fn decorations(&self) -> DecorationFlags {
        DecorationFlags::from_bits_truncate(self.decorations.load(Ordering::Relaxed))
    }

    /// Installs `sink`, or the default sink for `None`, and returns the previous one.
    ///
    /// Hand the returned sink back to `set_sink` to restore it.
    pub fn set_sink(&self, sink: Option<Arc<dyn LogSink>>) -> Arc<dyn LogSink> {
        let previous = self.sinks.set_sink(sink);
        self.mark_reconfigured();
        previous
    }

    #[must_use]
    pub fn sink(&self) -> Arc<dyn LogSink> {
        self.sinks.get_sink()
    }

    #[must_use]
    pub fn sinks(&self) -> &SinkRegistry {
        &self.sinks
    }

    #[must_use]
    pub fn state(&self) -> FacilityState {
        FacilityState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Restores the default sink and stops delivering lines. Cannot be undone.
    pub fn shutdown(&self) {
        self.state
            .store(FacilityState::Shutdown as u8, Ordering::Release);
        self.sinks.set_sink(None);
    }

    /// Indents later lines of the calling thread by one level.
    pub fn push_indent(&self) {
        INDENT.with(|i| i.set(i.get().saturating_add(1)));
    }

    pub fn pop_indent(&self) {
        INDENT.with(|i| i.set(i.get().saturating_sub(1)));
    }

    /// Indentation depth of the calling thread.
    #[must_use]
    pub fn indent(&self) -> usize {
        INDENT.with(Cell::get)
    }

    fn mark_running(&self) {
        for from in [FacilityState::Configured, FacilityState::Reconfigured] {
            let _ = self.state.compare_exchange(
                from as u8,
                FacilityState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
        }
    }

    fn mark_reconfigured(&self) {
        let _ = self.state.fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
            match FacilityState::from_u8(raw) {
                FacilityState::Shutdown => None,
                _ => Some(FacilityState::Reconfigured as u8),
            }
        });
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContext")
            .field("threshold", &self.threshold())
            .field("decorations", &self.decorations())
            .field("state", &self.state())
            .field("sinks", &self.sinks)
            .finish_non_exhaustive()
    }
}

/// Runs `f` with the thread's line buffer.
///
/// A sink that logs again from inside `f` finds the buffer taken and gets a
/// fresh one for the nested line.
fn with_line_buffer<R>(capacity: usize, f: impl FnOnce(&mut String) -> R) -> R {
    LINE_BUF.with(|cell| match cell.try_borrow_mut() {
        Ok(mut buf) => {
            buf.clear();
            buf.reserve(capacity);
            f(&mut buf)
        }
        Err(_) => f(&mut String::with_capacity(capacity)),
    })
}
