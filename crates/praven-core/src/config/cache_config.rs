use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Response cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL for per-call API responses.
    pub ttl_hours: u64,
    /// TTL for the regional pre-fetch index.
    pub regional_ttl_days: u64,
    /// Maximum entries held in memory.
    pub max_entries: u64,
    /// How long a failed call is answered from the cache instead of retried.
    /// Zero retries every time.
    pub failure_ttl_secs: u64,
    /// SQLite file for the persistent tier. `None` keeps the cache in memory only.
    pub persistent_path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: defaults::DEFAULT_CACHE_TTL_HOURS,
            regional_ttl_days: defaults::DEFAULT_REGIONAL_TTL_DAYS,
            max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
            failure_ttl_secs: defaults::DEFAULT_CACHE_FAILURE_TTL_SECS,
            persistent_path: None,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours * 3600)
    }

    pub fn failure_ttl(&self) -> Duration {
        Duration::from_secs(self.failure_ttl_secs)
    }

    pub fn regional_ttl(&self) -> Duration {
        Duration::from_secs(self.regional_ttl_days * 86_400)
    }
}
