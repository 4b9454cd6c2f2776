//! Persistent tier backed by SQLite.
//!
//! Stores `key → (json value, created_at)` rows and survives restarts.
//! A row that cannot be decoded is reported as corrupt; callers delete it
//! and treat the lookup as a miss.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use praven_core::errors::CacheError;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::entry::CacheEntry;

fn to_cache_err(e: rusqlite::Error) -> CacheError {
    CacheError::SqliteError {
        message: e.to_string(),
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// SQLite response store shared by all evaluator threads.
pub struct SqliteCacheStore {
    conn: Mutex<Connection>,
}

impl SqliteCacheStore {
    /// Open (or create) a store at `path`.
    pub fn open(path: &Path) -> Result<Self, CacheError> {
        let conn = Connection::open(path).map_err(to_cache_err)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            ",
        )
        .map_err(to_cache_err)?;
        Self::init(conn)
    }

    /// Private in-memory store, mainly for tests.
    pub fn open_in_memory() -> Result<Self, CacheError> {
        Self::init(Connection::open_in_memory().map_err(to_cache_err)?)
    }

    fn init(conn: Connection) -> Result<Self, CacheError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS response_cache (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            ",
        )
        .map_err(to_cache_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, CacheError>,
    ) -> Result<T, CacheError> {
        let conn = self.conn.lock().map_err(|e| CacheError::SqliteError {
            message: format!("connection lock poisoned: {e}"),
        })?;
        f(&conn)
    }

    pub fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        let row: Option<(String, String)> = self.with_conn(|conn| {
            conn.query_row(
                "SELECT value, created_at FROM response_cache WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(to_cache_err)
        })?;

        let Some((raw_value, raw_created)) = row else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw_value).map_err(|e| CacheError::CorruptEntry {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        let created_at = DateTime::parse_from_rfc3339(&raw_created)
            .map_err(|e| CacheError::CorruptEntry {
                key: key.to_string(),
                reason: e.to_string(),
            })?
            .with_timezone(&Utc);
        Ok(Some(CacheEntry::new(key, value, created_at)))
    }

    /// Insert or replace. Last writer wins.
    pub fn put(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        let value = serde_json::to_string(&entry.value).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO response_cache (key, value, created_at) VALUES (?1, ?2, ?3)",
                params![entry.key, value, timestamp(entry.created_at)],
            )
            .map_err(to_cache_err)
        })?;
        debug!(key = %entry.key, "persistent cache write");
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM response_cache WHERE key = ?1", params![key])
                .map_err(to_cache_err)
        })?;
        Ok(())
    }

    /// Delete every row created before `cutoff`. Returns the number removed.
    pub fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, CacheError> {
        // Fixed-width UTC timestamps sort lexicographically.
        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM response_cache WHERE created_at < ?1",
                params![timestamp(cutoff)],
            )
            .map_err(to_cache_err)
        })
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM response_cache", [])
                .map_err(to_cache_err)
        })?;
        Ok(())
    }

    pub fn len(&self) -> Result<usize, CacheError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM response_cache", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| n as usize)
            .map_err(to_cache_err)
        })
    }

    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.len()? == 0)
    }
}
