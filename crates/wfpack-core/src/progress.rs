//! Progress reporting
//!
//! The executor announces the number of assets once, then advances by one
//! for every asset that is present at the destination afterwards.

/// Receiver of progress updates
pub trait ProgressSink {
    /// Called once before the first asset, with the asset count
    fn start(&mut self, total: usize);

    /// Called after each finished asset
    fn advance(&mut self, by: usize);
}

/// Sink that discards updates
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn start(&mut self, _total: usize) {}

    fn advance(&mut self, _by: usize) {}
}

/// Sink that keeps counters, for hosts that poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingProgress {
    pub total: usize,
    pub done: usize,
}

impl ProgressSink for CountingProgress {
    fn start(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn advance(&mut self, by: usize) {
        self.done = self.done.saturating_add(by);
    }
}

/// Sink that logs each step through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress {
    counter: CountingProgress,
}

impl LogProgress {
    /// Create logging sink
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for LogProgress {
    fn start(&mut self, total: usize) {
        self.counter.start(total);
        tracing::info!("Backing up {} models", total);
    }

    fn advance(&mut self, by: usize) {
        self.counter.advance(by);
        tracing::info!("Progress: {}/{}", self.counter.done, self.counter.total);
    }
}
