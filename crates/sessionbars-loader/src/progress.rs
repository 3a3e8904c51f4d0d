//! Progress tracking for session loads.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Thread-safe progress counters for a running load.
///
/// Clones share the same counters, so a caller can keep one handle to poll
/// (for a spinner or status line) while the loader updates another.
#[derive(Debug, Clone, Default)]
pub struct LoadProgress {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    total: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
    bars: AtomicUsize,
}

impl LoadProgress {
    /// Creates a tracker with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn start(&self, total: usize) {
        self.inner.total.store(total, Ordering::Relaxed);
        self.inner.completed.store(0, Ordering::Relaxed);
        self.inner.failed.store(0, Ordering::Relaxed);
        self.inner.bars.store(0, Ordering::Relaxed);
    }

    pub(crate) fn record_loaded(&self, bars: usize) {
        self.inner.bars.fetch_add(bars, Ordering::Relaxed);
        self.inner.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed(&self) {
        self.inner.failed.fetch_add(1, Ordering::Relaxed);
        self.inner.completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Symbols in the current load.
    #[must_use]
    pub fn total(&self) -> usize {
        self.inner.total.load(Ordering::Relaxed)
    }

    /// Symbols finished, failed ones included.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.inner.completed.load(Ordering::Relaxed)
    }

    /// Symbols that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.inner.failed.load(Ordering::Relaxed)
    }

    /// Bars written so far.
    #[must_use]
    pub fn bars(&self) -> usize {
        self.inner.bars.load(Ordering::Relaxed)
    }

    /// Returns completion as a percentage (0-100).
    #[must_use]
    pub fn percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.completed() as f64 / total as f64) * 100.0
    }
}

impl std::fmt::Display for LoadProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} symbols, {} bars",
            self.completed(),
            self.total(),
            self.bars()
        )?;
        if self.failed() > 0 {
            write!(f, ", {} failed", self.failed())?;
        }
        Ok(())
    }
}
