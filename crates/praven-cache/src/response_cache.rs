//! Cache coordinator.
//!
//! Lookup order: memory → persistent. A persistent hit is promoted to memory.
//! Writes go to both tiers. Expired and undecodable entries are evicted from
//! both tiers and reported as misses. A failed read-through fetch is
//! remembered in memory for `failure_ttl` and answered without a new call.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::sync::Cache;
use praven_core::config::defaults::DEFAULT_CACHE_FAILURE_TTL_SECS;
use praven_core::config::CacheConfig;
use praven_core::errors::CacheError;
use praven_core::traits::{Clock, SystemClock};
use praven_observability::cache_span;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::entry::CacheEntry;
use crate::memory::MemoryTier;
use crate::sqlite::SqliteCacheStore;

/// Which tier answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheHitTier {
    Memory,
    Persistent,
    Miss,
}

/// Failure of a read-through fetch.
#[derive(Debug, Clone)]
pub enum FetchError<E> {
    /// The upstream call failed. Nothing was cached.
    Upstream(E),
    /// The fetched value could not be stored or read back.
    Cache(String),
    /// The upstream call for this key failed moments ago and was not retried.
    RecentFailure(String),
}

impl<E: fmt::Display> fmt::Display for FetchError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Upstream(e) => write!(f, "{e}"),
            FetchError::Cache(reason) => write!(f, "cache failure: {reason}"),
            FetchError::RecentFailure(reason) => write!(f, "{reason} (not retried yet)"),
        }
    }
}

#[derive(Debug, Clone)]
struct FailureMark {
    reason: String,
    recorded_at: DateTime<Utc>,
}

/// TTL response cache shared by every evaluator thread.
pub struct ResponseCache {
    memory: MemoryTier,
    persistent: Option<SqliteCacheStore>,
    failures: Cache<String, FailureMark>,
    failure_ttl: Duration,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResponseCache {
    /// Memory-only cache with the given TTL and capacity.
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        Self {
            memory: MemoryTier::new(max_entries, ttl),
            persistent: None,
            failures: Cache::new(max_entries),
            failure_ttl: Duration::from_secs(DEFAULT_CACHE_FAILURE_TTL_SECS),
            ttl,
            clock: Arc::new(SystemClock),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Per-call API cache as configured: `ttl_hours`, optional SQLite tier.
    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        let cache =
            Self::new(config.ttl(), config.max_entries).with_failure_ttl(config.failure_ttl());
        match &config.persistent_path {
            Some(path) => Ok(cache.with_persistent(SqliteCacheStore::open(path)?)),
            None => Ok(cache),
        }
    }

    /// Regional pre-fetch cache as configured: `regional_ttl_days`, memory only.
    pub fn regional_from_config(config: &CacheConfig) -> Self {
        Self::new(config.regional_ttl(), config.max_entries).with_failure_ttl(config.failure_ttl())
    }

    pub fn with_persistent(mut self, store: SqliteCacheStore) -> Self {
        self.persistent = Some(store);
        self
    }

    /// How long a failed fetch is answered without calling upstream again.
    /// Zero disables failure caching.
    pub fn with_failure_ttl(mut self, failure_ttl: Duration) -> Self {
        self.failure_ttl = failure_ttl;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Live value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.lookup(key).0.map(|entry| entry.value.clone())
    }

    /// Live value for `key` decoded as `T`. Undecodable entries are evicted.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let (entry, _) = self.lookup(key);
        let entry = entry?;
        match serde_json::from_value(entry.value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "undecodable cache entry, evicting");
                self.invalidate(key);
                None
            }
        }
    }

    /// Look up `key` and report the answering tier.
    pub fn lookup(&self, key: &str) -> (Option<Arc<CacheEntry>>, CacheHitTier) {
        let now = self.clock.now();

        if let Some(entry) = self.memory.get(key) {
            if entry.is_expired(now, self.ttl) {
                debug!(key, "memory entry expired");
                self.invalidate(key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                return (None, CacheHitTier::Miss);
            }
            self.hits.fetch_add(1, Ordering::Relaxed);
            return (Some(entry), CacheHitTier::Memory);
        }

        if let Some(store) = &self.persistent {
            match store.get(key) {
                Ok(Some(entry)) if entry.is_expired(now, self.ttl) => {
                    debug!(key, "persistent entry expired");
                    self.delete_persistent(key);
                }
                Ok(Some(entry)) => {
                    let entry = Arc::new(entry);
                    self.memory.insert(entry.clone());
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return (Some(entry), CacheHitTier::Persistent);
                }
                Ok(None) => {}
                Err(CacheError::CorruptEntry { key, reason }) => {
                    warn!(key = %key, reason = %reason, "corrupt persistent entry, evicting");
                    self.delete_persistent(&key);
                }
                Err(e) => warn!(key, error = %e, "persistent cache read failed"),
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        (None, CacheHitTier::Miss)
    }

    /// Store `value` under `key` in every tier.
    pub fn set(&self, key: &str, value: serde_json::Value) {
        let entry = Arc::new(CacheEntry::new(key, value, self.clock.now()));
        self.memory.insert(entry.clone());
        self.failures.invalidate(key);
        self.persist(&entry);
    }

    /// Serialize and store `value`.
    pub fn set_as<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let json = serde_json::to_value(value).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        self.set(key, json);
        Ok(())
    }

    /// Read-through lookup. On a miss, `fetch` runs at most once across all
    /// threads concurrently asking for the same key; the others wait for and
    /// share its result. An upstream error is held for `failure_ttl` and
    /// returned as [`FetchError::RecentFailure`] without calling `fetch`.
    pub fn get_or_try_fetch<T, E, F>(&self, key: &str, fetch: F) -> Result<T, FetchError<E>>
    where
        T: Serialize + DeserializeOwned,
        E: Clone + fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> Result<T, E>,
    {
        let span = cache_span!("get_or_try_fetch");
        let _guard = span.enter();

        if let Some(v) = self.get_as::<T>(key) {
            return Ok(v);
        }
        if let Some(reason) = self.recent_failure(key) {
            debug!(key, "recent upstream failure, not retrying");
            return Err(FetchError::RecentFailure(reason));
        }

        let entry = self
            .memory
            .try_get_with(key, || {
                let value = fetch().map_err(|e| {
                    self.remember_failure(key, &e);
                    FetchError::Upstream(e)
                })?;
                let json = serde_json::to_value(&value)
                    .map_err(|e| FetchError::Cache(e.to_string()))?;
                let entry = Arc::new(CacheEntry::new(key, json, self.clock.now()));
                self.persist(&entry);
                Ok::<_, FetchError<E>>(entry)
            })
            .map_err(|e| (*e).clone())?;

        serde_json::from_value(entry.value.clone()).map_err(|e| {
            self.invalidate(key);
            FetchError::Cache(e.to_string())
        })
    }

    /// Remove `key` from every tier.
    pub fn invalidate(&self, key: &str) {
        self.memory.invalidate(key);
        self.failures.invalidate(key);
        self.delete_persistent(key);
    }

    /// Remove every entry from every tier.
    pub fn clear(&self) {
        self.memory.clear();
        self.failures.invalidate_all();
        if let Some(store) = &self.persistent {
            if let Err(e) = store.clear() {
                warn!(error = %e, "persistent cache clear failed");
            }
        }
    }

    /// Entries currently held in memory.
    pub fn len(&self) -> u64 {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (hits, misses) since construction.
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    fn remember_failure(&self, key: &str, error: &impl fmt::Display) {
        if self.failure_ttl.is_zero() {
            return;
        }
        self.failures.insert(
            key.to_string(),
            FailureMark {
                reason: error.to_string(),
                recorded_at: self.clock.now(),
            },
        );
    }

    fn recent_failure(&self, key: &str) -> Option<String> {
        let mark = self.failures.get(key)?;
        let age = self.clock.now().signed_duration_since(mark.recorded_at);
        let live = chrono::Duration::from_std(self.failure_ttl).is_ok_and(|ttl| age < ttl);
        if live {
            Some(mark.reason)
        } else {
            self.failures.invalidate(key);
            None
        }
    }

    fn persist(&self, entry: &CacheEntry) {
        if let Some(store) = &self.persistent {
            if let Err(e) = store.put(entry) {
                warn!(key = %entry.key, error = %e, "persistent cache write failed");
            }
        }
    }

    fn delete_persistent(&self, key: &str) {
        if let Some(store) = &self.persistent {
            if let Err(e) = store.delete(key) {
                warn!(key, error = %e, "persistent cache delete failed");
            }
        }
    }
}
