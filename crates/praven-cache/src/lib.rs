//! # praven-cache
//!
//! Read-through cache for external occurrence lookups.
//!
//! Memory tier (moka) → persistent tier (SQLite, optional).
//! Keys are blake3 hashes of a canonical call signature. Entries expire
//! lazily on read once older than the cache TTL.

pub mod entry;
pub mod key;
pub mod memory;
pub mod response_cache;
pub mod sqlite;

pub use entry::CacheEntry;
pub use key::CacheKey;
pub use memory::MemoryTier;
pub use response_cache::{CacheHitTier, FetchError, ResponseCache};
pub use sqlite::SqliteCacheStore;
