use super::error_code::{self, PravenErrorCode};

/// Response cache errors. Readers treat every one of these as a miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("cache entry {key} is unreadable: {reason}")]
    CorruptEntry { key: String, reason: String },

    #[error("cache value serialization failed: {reason}")]
    Serialization { reason: String },
}

impl PravenErrorCode for CacheError {
    fn error_code(&self) -> &'static str {
        error_code::CACHE_ERROR
    }
}
