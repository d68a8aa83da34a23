//! TTL cache - explicit freshness, explicit invalidation
//!
//! Owned by whichever component needs it rather than shared as global
//! state. Entries past their TTL are still returned (marked stale) so
//! callers can choose between "refresh" and "serve stale" policies.

use std::hash::Hash;
use std::time::{Duration, Instant};

use dashmap::DashMap;

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// A concurrent key-value cache with a fixed time-to-live per cache.
pub struct TtlCache<K, V> {
    entries: DashMap<K, Entry<V>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache whose entries are fresh for `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Look up a key, returning the value and whether it is still fresh
    pub fn get(&self, key: &K) -> Option<(V, bool)> {
        self.entries.get(key).map(|entry| {
            let fresh = entry.inserted_at.elapsed() < self.ttl;
            (entry.value.clone(), fresh)
        })
    }

    /// Insert or refresh a value
    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop a single key
    pub fn invalidate(&self, key: &K) {
        self.entries.remove(key);
    }

    /// Drop everything
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of cached entries, fresh or stale
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> std::fmt::Debug for TtlCache<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.entries.len())
            .finish()
    }
}
