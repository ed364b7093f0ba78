//! Cache Store Module
//!
//! The process-wide result cache: a key to entry map with per-entry TTL and
//! an optional capacity bound enforced by least-recently-used eviction.
//!
//! Misses are data, not faults: `get` returns `Option` and never errors.
//! `set` is infallible; when the capacity bound is reached, the least
//! recently used entry is evicted to make room.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{AccessOrder, CacheEntry, CacheStats};

/// Shared handle to the process-wide cache, as stored in application state.
pub type SharedCache = Arc<RwLock<TtlCache>>;

// == TTL Cache ==
/// In-memory cache with TTL expiry and optional LRU-bounded capacity.
#[derive(Debug)]
pub struct TtlCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Recency tracking for eviction
    order: AccessOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries (None = unbounded)
    max_entries: Option<usize>,
}

impl TtlCache {
    /// Creates a cache with no capacity bound (growth limited only by TTLs).
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Creates a cache, optionally bounded to `max_entries` with LRU eviction.
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            order: AccessOrder::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    /// Wraps a cache into the shared handle used by handlers and tools.
    pub fn shared(self) -> SharedCache {
        Arc::new(RwLock::new(self))
    }

    // == Get ==
    /// Returns the value for `key` if present and unexpired.
    ///
    /// Expired entries are removed on observation and treated identically to
    /// missing ones. Each call records a hit or a miss and refreshes recency.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.order.forget(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                debug!(key, "cache entry expired");
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                self.order.promote(key);
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl_seconds` from now.
    ///
    /// An existing entry is replaced wholesale and its deadline reset. When a
    /// capacity bound is configured and the cache is full, the least recently
    /// used entry is evicted first.
    pub fn set(&mut self, key: String, value: String, ttl_seconds: u64) {
        let is_overwrite = self.entries.contains_key(&key);

        if let Some(max) = self.max_entries {
            if !is_overwrite && self.entries.len() >= max {
                if let Some(evicted) = self.order.pop_lru() {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                    debug!(key = %evicted, "evicted least recently used entry");
                }
            }
        }

        self.entries
            .insert(key.clone(), CacheEntry::new(value, ttl_seconds));
        self.order.promote(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.entries.remove(&key);
            self.order.forget(&key);
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_set_and_get() {
        let mut cache = TtlCache::unbounded();

        cache.set("k".to_string(), "v".to_string(), 300);

        assert_eq!(cache.get("k"), Some("v".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_missing_is_none() {
        let mut cache = TtlCache::unbounded();
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_overwrite_replaces_wholesale() {
        let mut cache = TtlCache::unbounded();

        cache.set("k".to_string(), "v1".to_string(), 300);
        cache.set("k".to_string(), "v2".to_string(), 300);

        assert_eq!(cache.get("k"), Some("v2".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entry_behaves_as_missing() {
        let mut cache = TtlCache::unbounded();

        cache.set("k".to_string(), "v".to_string(), 1);
        assert!(cache.get("k").is_some());

        sleep(Duration::from_millis(1100));

        assert_eq!(cache.get("k"), None);
        // lazy removal: the expired entry is gone, not just hidden
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_unbounded_cache_never_evicts() {
        let mut cache = TtlCache::unbounded();

        for i in 0..500 {
            cache.set(format!("k{i}"), "v".to_string(), 300);
        }

        assert_eq!(cache.len(), 500);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_bounded_cache_evicts_lru() {
        let mut cache = TtlCache::new(Some(3));

        cache.set("k1".to_string(), "v1".to_string(), 300);
        cache.set("k2".to_string(), "v2".to_string(), 300);
        cache.set("k3".to_string(), "v3".to_string(), 300);

        // k1 becomes most recent, so k2 is the eviction candidate
        cache.get("k1");
        cache.set("k4".to_string(), "v4".to_string(), 300);

        assert_eq!(cache.len(), 3);
        assert!(cache.get("k1").is_some());
        assert_eq!(cache.get("k2"), None);
        assert!(cache.get("k3").is_some());
        assert!(cache.get("k4").is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let mut cache = TtlCache::unbounded();

        cache.set("k".to_string(), "v".to_string(), 300);
        cache.get("k"); // hit
        cache.get("absent"); // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_cleanup_expired() {
        let mut cache = TtlCache::unbounded();

        cache.set("short".to_string(), "v".to_string(), 1);
        cache.set("long".to_string(), "v".to_string(), 300);

        sleep(Duration::from_millis(1100));

        let removed = cache.cleanup_expired();
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("long").is_some());
    }
}
