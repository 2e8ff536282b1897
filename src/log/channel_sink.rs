use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
    mpsc,
};

use crate::log::{log_level::LogLevel, log_sink::LogSink};

/// Owned copy of a rendered line, as forwarded by [`ChannelSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub level: LogLevel,
    pub text: String,
}

/// Lightweight, cloneable sink that forwards lines into a bounded channel.
///
/// Forwarding never blocks the emitting thread: if the queue is full or the
/// receiver is gone the line is dropped and counted. Useful to hand log
/// lines to a UI or a writer thread owned by the host application.
///
/// # Examples
/// ```ignore
/// let (sink, rx) = ChannelSink::bounded(256);
/// ctx.set_sink(Some(Arc::new(sink)));
/// while let Ok(line) = rx.recv() { /* ... */ }
/// ```
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::SyncSender<RenderedLine>,
    dropped: Arc<AtomicUsize>,
}

impl ChannelSink {
    /// Creates the sink and the receiving end of its queue.
    #[must_use]
    pub fn bounded(cap: usize) -> (Self, mpsc::Receiver<RenderedLine>) {
        let (tx, rx) = mpsc::sync_channel(cap);
        (
            Self {
                tx,
                dropped: Arc::new(AtomicUsize::new(0)),
            },
            rx,
        )
    }

    /// Attempts to enqueue a line without blocking.
    ///
    /// # Errors
    /// Returns:
    /// - `Err(TrySendError::Full(_))` when the bounded queue is at capacity (line is not sent).
    /// - `Err(TrySendError::Disconnected(_))` when the receiver has been dropped.
    pub fn try_forward(
        &self,
        level: LogLevel,
        line: &str,
    ) -> Result<(), mpsc::TrySendError<RenderedLine>> {
        self.tx.try_send(RenderedLine {
            level,
            text: line.to_owned(),
        })
    }

    /// Number of lines dropped so far by this sink and its clones.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl LogSink for ChannelSink {
    #[inline]
    fn log(&self, level: LogLevel, line: &str) {
        if self.try_forward(level, line).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}
