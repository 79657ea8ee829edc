//! Log core metrics for observability
//!
//! Counters for monitoring the health of a log core: delivered records,
//! records dropped while unconfigured, and sink failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for log core observability
///
/// # Example
///
/// ```
/// use scoped_logger::CoreMetrics;
///
/// let metrics = CoreMetrics::new();
///
/// metrics.record_delivered();
/// metrics.record_dropped_unconfigured();
///
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.dropped_unconfigured(), 1);
/// ```
#[derive(Debug)]
pub struct CoreMetrics {
    /// Records handed to every selected appender without error
    delivered: AtomicU64,

    /// Records emitted while no configuration was installed
    dropped_unconfigured: AtomicU64,

    /// Records rejected by the core or sink filters
    filtered: AtomicU64,

    /// Appender calls that returned an error or panicked
    sink_failures: AtomicU64,

    /// Configurations installed over the core's lifetime
    installs: AtomicU64,
}

impl CoreMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            dropped_unconfigured: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            installs: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_unconfigured(&self) -> u64 {
        self.dropped_unconfigured.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn installs(&self) -> u64 {
        self.installs.load(Ordering::Relaxed)
    }

    /// Record a delivered record, returning the previous count
    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped_unconfigured(&self) -> u64 {
        self.dropped_unconfigured.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_install(&self) -> u64 {
        self.installs.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.delivered.store(0, Ordering::Relaxed);
        self.dropped_unconfigured.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.installs.store(0, Ordering::Relaxed);
    }
}

impl Default for CoreMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CoreMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            delivered: AtomicU64::new(self.delivered()),
            dropped_unconfigured: AtomicU64::new(self.dropped_unconfigured()),
            filtered: AtomicU64::new(self.filtered()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            installs: AtomicU64::new(self.installs()),
        }
    }
}
