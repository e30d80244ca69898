//! FILENAME: tabular/src/memo.rs
//! PURPOSE: Parameter-keyed memoization with an explicit TTL.
//! CONTEXT: The data-access layer re-requests the same aggregations on
//! every user interaction. Results are pure functions of their inputs, so
//! callers may wrap an engine call in a `MemoCache` keyed by the hash of
//! (function name, arguments). Entries older than the TTL are recomputed.

use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use rustc_hash::{FxHashMap, FxHasher};

/// Hashes a function name together with its arguments into a cache key.
pub fn memo_key<A: Hash>(name: &str, args: &A) -> u64 {
    let mut hasher = FxHasher::default();
    name.hash(&mut hasher);
    args.hash(&mut hasher);
    hasher.finish()
}

struct Entry<V> {
    value: V,
    computed_at: Instant,
}

/// A TTL-bounded cache of computed values, owned by the caller.
pub struct MemoCache<V> {
    ttl: Duration,
    entries: FxHashMap<u64, Entry<V>>,
}

impl<V: Clone> MemoCache<V> {
    pub fn new(ttl: Duration) -> Self {
        MemoCache {
            ttl,
            entries: FxHashMap::default(),
        }
    }

    /// Returns the cached value for `key` if it is still fresh, otherwise
    /// runs `compute`, stores the result, and returns it.
    pub fn get_or_insert_with(&mut self, key: u64, compute: impl FnOnce() -> V) -> V {
        if let Some(entry) = self.entries.get(&key) {
            if entry.computed_at.elapsed() < self.ttl {
                return entry.value.clone();
            }
        }

        let value = compute();
        self.entries.insert(
            key,
            Entry {
                value: value.clone(),
                computed_at: Instant::now(),
            },
        );
        value
    }

    /// Drops entries older than the TTL.
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.computed_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
