//! # Tokenizer Metrics

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use compact_str::CompactString;
use parking_lot::Mutex;

use crate::{
    metrics::MetricsSink,
    types::PTHashMap,
};

/// Per-operation call count and accumulated time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationStats {
    /// Completed calls.
    pub calls: u64,

    /// Total time across all calls.
    pub total: Duration,
}

/// A point-in-time snapshot of [`TokenizerMetrics`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSummary {
    /// Tokens produced, including those served from cache.
    pub total_tokens: u64,

    /// Distinct token values produced.
    pub unique_tokens: usize,

    /// Cache hits.
    pub cache_hits: u64,

    /// Cache misses.
    pub cache_misses: u64,

    /// Stats per operation name, sorted by name.
    pub operations: BTreeMap<&'static str, OperationStats>,
}

impl MetricsSummary {
    /// The fraction of cache lookups that hit; `0.0` with no lookups.
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / lookups as f64
        }
    }
}

/// The default [`MetricsSink`]: counters, a token histogram, and
/// per-operation timings.
#[derive(Debug, Default)]
pub struct TokenizerMetrics {
    total_tokens: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    token_counts: Mutex<PTHashMap<CompactString, u64>>,
    operations: Mutex<BTreeMap<&'static str, OperationStats>>,
}

impl TokenizerMetrics {
    /// Create an empty metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `value` has been produced.
    pub fn token_count(
        &self,
        value: &str,
    ) -> u64 {
        self.token_counts
            .lock()
            .get(value)
            .copied()
            .unwrap_or(0)
    }

    /// Snapshot every counter.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_tokens: self.total_tokens.load(Ordering::Relaxed),
            unique_tokens: self.token_counts.lock().len(),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            operations: self.operations.lock().clone(),
        }
    }
}

impl MetricsSink for TokenizerMetrics {
    fn record_token(
        &self,
        value: &str,
    ) {
        self.total_tokens.fetch_add(1, Ordering::Relaxed);
        let mut counts = self.token_counts.lock();
        match counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                counts.insert(CompactString::from(value), 1);
            }
        }
    }

    fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    fn end_operation(
        &self,
        name: &'static str,
        elapsed: Duration,
    ) {
        log::debug!("{name} took {}ms", elapsed.as_millis());
        let mut operations = self.operations.lock();
        let stats = operations.entry(name).or_default();
        stats.calls += 1;
        stats.total += elapsed;
    }

    fn log_summary(&self) {
        let summary = self.summary();
        log::info!(
            "Tokenizer metrics: total tokens: {}, cache hit rate: {:.2}%, unique tokens: {}",
            summary.total_tokens,
            summary.cache_hit_rate() * 100.0,
            summary.unique_tokens
        );
        for (name, stats) in &summary.operations {
            log::info!(
                "{name} - calls: {}, total time: {}ms",
                stats.calls,
                stats.total.as_millis()
            );
        }
    }
}
