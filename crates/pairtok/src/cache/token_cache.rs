//! # Token Cache

use core::hash::BuildHasher;
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};

use compact_str::CompactString;
use parking_lot::{Mutex, RwLock};

use crate::{
    concurrency::threads::default_shard_count,
    metrics::MetricsSink,
    types::{PTBuildHasher, PTHashMap, hash_map_new},
    vocab::Token,
};

/// One cached token sequence and its usage.
#[derive(Debug)]
struct CachedEntry {
    tokens: Arc<[Token]>,
    hits: AtomicU64,
    last_accessed: Mutex<Instant>,
}

impl CachedEntry {
    fn new(tokens: Arc<[Token]>) -> Self {
        Self {
            tokens,
            hits: AtomicU64::new(1),
            last_accessed: Mutex::new(Instant::now()),
        }
    }

    fn touch(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        *self.last_accessed.lock() = Instant::now();
    }

    fn hit_count(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    fn idle_time(&self) -> Duration {
        self.last_accessed.lock().elapsed()
    }
}

type Shard = RwLock<PTHashMap<CompactString, Arc<CachedEntry>>>;

/// Bounded ``{ text -> tokens }`` memo with least-frequently-used eviction.
///
/// Entries live in independently locked shards, so lookups and inserts
/// for different keys rarely contend. Eviction is the only operation
/// which coordinates across shards.
///
/// Concurrent inserts may briefly push the size past `capacity`; the next
/// insert at or over capacity evicts back under it.
pub struct TokenCache {
    shards: Vec<Shard>,
    hasher: PTBuildHasher,
    len: AtomicUsize,
    capacity: usize,
    eviction_lock: Mutex<()>,
    metrics: Arc<dyn MetricsSink>,
}

impl core::fmt::Debug for TokenCache {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("TokenCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("shards", &self.shards.len())
            .finish()
    }
}

impl TokenCache {
    /// Create an empty cache.
    ///
    /// ## Arguments
    /// * `capacity` - the maximum number of entries; `0` stores nothing.
    /// * `metrics` - receives a hit or miss for every lookup.
    pub fn new(
        capacity: usize,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        let shards = (0..default_shard_count())
            .map(|_| RwLock::new(hash_map_new()))
            .collect();
        Self {
            shards,
            hasher: PTBuildHasher::default(),
            len: AtomicUsize::new(0),
            capacity,
            eviction_lock: Mutex::new(()),
            metrics,
        }
    }

    /// The maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The current number of entries.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn shard(
        &self,
        text: &str,
    ) -> &Shard {
        &self.shards[self.shard_index(text)]
    }

    fn shard_index(
        &self,
        text: &str,
    ) -> usize {
        (self.hasher.hash_one(text) as usize) % self.shards.len()
    }

    /// Look up the tokens cached for `text`.
    ///
    /// A hit increments the entry's hit count and is reported to the
    /// metrics sink; so is a miss. Empty text is never cached.
    pub fn try_get(
        &self,
        text: &str,
    ) -> Option<Arc<[Token]>> {
        if text.is_empty() {
            return None;
        }

        let entry = self.shard(text).read().get(text).cloned();
        match entry {
            Some(entry) => {
                entry.touch();
                self.metrics.record_cache_hit();
                Some(entry.tokens.clone())
            }
            None => {
                self.metrics.record_cache_miss();
                None
            }
        }
    }

    /// The hit count of the entry for `text`, if cached.
    ///
    /// New entries start at 1. Does not count as a lookup.
    pub fn hit_count(
        &self,
        text: &str,
    ) -> Option<u64> {
        self.shard(text)
            .read()
            .get(text)
            .map(|entry| entry.hit_count())
    }

    /// Time since the entry for `text` was created or last hit, if cached.
    ///
    /// Informational; eviction ignores recency.
    pub fn idle_time(
        &self,
        text: &str,
    ) -> Option<Duration> {
        self.shard(text)
            .read()
            .get(text)
            .map(|entry| entry.idle_time())
    }

    /// Cache `tokens` for `text`.
    ///
    /// The first writer wins: an already-cached key is left unchanged.
    /// At or over capacity, the least-hit entries are evicted first.
    pub fn put<T: Into<Arc<[Token]>>>(
        &self,
        text: &str,
        tokens: T,
    ) {
        if text.is_empty() || self.capacity == 0 {
            return;
        }

        let shard = self.shard(text);
        if shard.read().contains_key(text) {
            return;
        }

        if self.len() >= self.capacity {
            self.evict();
        }

        let mut guard = shard.write();
        if guard.contains_key(text) {
            return;
        }
        guard.insert(
            CompactString::from(text),
            Arc::new(CachedEntry::new(tokens.into())),
        );
        self.len.fetch_add(1, Ordering::AcqRel);
    }

    /// Remove the least-hit entries to make room for one more.
    ///
    /// Snapshots every entry, sorts ascending by hit count (stable over
    /// shard order), and removes ``len - capacity + 1`` of them.
    fn evict(&self) {
        let _guard = self.eviction_lock.lock();
        if self.len() < self.capacity {
            // Another caller already made room.
            return;
        }

        let mut snapshot: Vec<(CompactString, u64)> = Vec::with_capacity(self.len());
        for shard in &self.shards {
            snapshot.extend(
                shard
                    .read()
                    .iter()
                    .map(|(key, entry)| (key.clone(), entry.hit_count())),
            );
        }
        snapshot.sort_by_key(|&(_, hits)| hits);

        let excess = (snapshot.len() + 1).saturating_sub(self.capacity);
        let mut removed = 0;
        for (key, _) in snapshot.into_iter().take(excess) {
            if self.shard(&key).write().remove(&key).is_some() {
                self.len.fetch_sub(1, Ordering::AcqRel);
                removed += 1;
            }
        }

        log::info!("Cache cleanup: removed {removed} entries");
    }

    /// Remove every entry.
    pub fn clear(&self) {
        for shard in &self.shards {
            let mut guard = shard.write();
            let removed = guard.len();
            guard.clear();
            self.len.fetch_sub(removed, Ordering::AcqRel);
        }
        log::info!("Token cache cleared");
    }
}
