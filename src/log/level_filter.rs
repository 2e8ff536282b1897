use std::sync::atomic::{AtomicU8, Ordering};

use crate::log::log_level::LogLevel;

/// Runtime verbosity threshold.
///
/// Loads and stores are `Relaxed`: a thread may briefly see the previous
/// threshold after another thread changes it.
#[derive(Debug)]
pub struct LevelFilter {
    threshold: AtomicU8,
}

impl LevelFilter {
    #[must_use]
    pub const fn new(threshold: LogLevel) -> Self {
        Self {
            threshold: AtomicU8::new(threshold.as_u8()),
        }
    }

    pub fn set_threshold(&self, level: LogLevel) {
        self.threshold.store(level.as_u8(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn threshold(&self) -> LogLevel {
        LogLevel::from_u8_saturating(self.threshold.load(Ordering::Relaxed))
    }

    /// `true` when `level <= threshold`.
    #[inline]
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.as_u8() <= self.threshold.load(Ordering::Relaxed)
    }
}
