//! # Metrics Sink

use std::time::{Duration, Instant};

/// Write-only receiver of tokenizer metrics.
///
/// The tokenizer never reads sink state back; any implementation,
/// including one that drops everything, is valid.
pub trait MetricsSink: Send + Sync {
    /// Record one produced token.
    fn record_token(
        &self,
        value: &str,
    );

    /// Record a cache hit.
    fn record_cache_hit(&self);

    /// Record a cache miss.
    fn record_cache_miss(&self);

    /// A named timed operation has started.
    fn begin_operation(
        &self,
        _name: &'static str,
    ) {
    }

    /// A named timed operation has ended, on any exit path.
    fn end_operation(
        &self,
        name: &'static str,
        elapsed: Duration,
    );

    /// Dump a summary of the collected metrics.
    fn log_summary(&self) {}
}

/// Scoped timer for a named operation.
///
/// Reports the elapsed time to its sink when dropped, so the
/// operation is closed on normal return, `?` returns, and cancellation.
#[must_use = "the operation ends when the timer is dropped"]
pub struct OperationTimer<'a> {
    sink: &'a dyn MetricsSink,
    name: &'static str,
    start: Instant,
}

impl OperationTimer<'_> {
    /// The operation name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Time since the operation started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for OperationTimer<'_> {
    fn drop(&mut self) {
        self.sink.end_operation(self.name, self.start.elapsed());
    }
}

/// Begin a named operation on `sink`.
///
/// ## Returns
/// An [`OperationTimer`] which ends the operation when dropped.
pub fn measure_operation<'a>(
    sink: &'a dyn MetricsSink,
    name: &'static str,
) -> OperationTimer<'a> {
    sink.begin_operation(name);
    OperationTimer {
        sink,
        name,
        start: Instant::now(),
    }
}

/// A [`MetricsSink`] which discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn record_token(
        &self,
        _value: &str,
    ) {
    }

    fn record_cache_hit(&self) {}

    fn record_cache_miss(&self) {}

    fn end_operation(
        &self,
        _name: &'static str,
        _elapsed: Duration,
    ) {
    }
}
