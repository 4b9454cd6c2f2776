//! In-memory tier using moka.
//!
//! TinyLFU admission, size-bounded eviction. Moka's own time-to-live is a
//! wall-clock backstop; logical expiry is decided by the coordinator's clock.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use crate::entry::CacheEntry;

/// Memory tier keyed by cache-key digest.
pub struct MemoryTier {
    cache: Cache<String, Arc<CacheEntry>>,
}

impl MemoryTier {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    pub fn get(&self, key: &str) -> Option<Arc<CacheEntry>> {
        self.cache.get(key)
    }

    pub fn insert(&self, entry: Arc<CacheEntry>) {
        self.cache.insert(entry.key.clone(), entry);
    }

    /// Return the live entry for `key`, or run `init` once for all concurrent
    /// callers asking for the same key and cache its result.
    pub fn try_get_with<F, E>(&self, key: &str, init: F) -> Result<Arc<CacheEntry>, Arc<E>>
    where
        F: FnOnce() -> Result<Arc<CacheEntry>, E>,
        E: Send + Sync + 'static,
    {
        self.cache.try_get_with(key.to_string(), init)
    }

    pub fn invalidate(&self, key: &str) {
        self.cache.invalidate(key);
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Entry count after pending maintenance has run.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
