//! Identity-keyed memoization of completed comparisons.
//!
//! Entries are keyed by the identity of the left operand and remember the
//! right operand they were computed against, together with a content
//! [`Fingerprint`] of both. A lookup only hits when all of them match, so an
//! entry left behind by a dropped or mutated value whose address is now
//! reused is never returned. There is no eviction: entries live as long as
//! the engine, or until [`MemoCache::clear`].
//!
//! In-progress comparisons are *not* tracked here. Cycle detection uses the
//! per-call walk stack in the engine, so one thread's unfinished comparison
//! can never be mistaken for a result by another thread.

use crate::inspect::Identity;
use crate::report::Report;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Content hashes of both operands at the time a report was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub left: u64,
    pub right: u64,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    right: Identity,
    fingerprint: Fingerprint,
    report: Arc<Report>,
}

/// Statistics for cache performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total cache lookups
    pub lookups: u64,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that required computation
    pub misses: u64,
    /// Misses where the entry's operands had since changed content
    pub stale: u64,
    /// Reports written to the cache
    pub stores: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    lookups: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    stale: AtomicU64,
    stores: AtomicU64,
}

/// Thread-safe memo of completed reports.
///
/// `get` and `put` are each atomic; nothing is locked across a whole
/// comparison, so two threads may compute the same entry and the last store
/// wins.
#[derive(Debug, Default)]
pub struct MemoCache {
    entries: RwLock<HashMap<Identity, CacheEntry>>,
    counters: Counters,
}

impl MemoCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report previously computed for `left` against `right`, provided both
    /// still have the content they had then.
    pub fn get(
        &self,
        left: Identity,
        right: Identity,
        fingerprint: Fingerprint,
    ) -> Option<Arc<Report>> {
        self.counters.lookups.fetch_add(1, Ordering::Relaxed);

        let (found, stale) = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(&left).filter(|entry| entry.right == right) {
                Some(entry) if entry.fingerprint == fingerprint => {
                    (Some(Arc::clone(&entry.report)), false)
                }
                Some(_) => (None, true),
                None => (None, false),
            }
        };

        if found.is_some() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
        }
        if stale {
            tracing::debug!("Discarding stale cache entry for {}", left.type_key());
            self.counters.stale.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Store a report for `left`, overwriting any previous entry.
    pub fn put(&self, left: Identity, right: Identity, fingerprint: Fingerprint, report: Report) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            left,
            CacheEntry {
                right,
                fingerprint,
                report: Arc::new(report),
            },
        );
        self.counters.stores.fetch_add(1, Ordering::Relaxed);
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            lookups: self.counters.lookups.load(Ordering::Relaxed),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            stale: self.counters.stale.load(Ordering::Relaxed),
            stores: self.counters.stores.load(Ordering::Relaxed),
        }
    }

    /// Clear all cached entries. Statistics are kept.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
