use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cached response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub value: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>, value: serde_json::Value, created_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            value,
            created_at,
        }
    }

    /// An entry is live while its age is strictly below the TTL.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now.signed_duration_since(self.created_at);
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => age >= ttl,
            Err(_) => false,
        }
    }
}
