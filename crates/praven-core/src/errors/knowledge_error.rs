use super::error_code::{self, PravenErrorCode};

/// Species knowledge base loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("knowledge table {table} failed to parse: {reason}")]
    ParseFailed { table: String, reason: String },

    #[error("knowledge file unreadable: {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("{entry}: habitat score for {habitat} out of range [0, 1]: {score}")]
    ScoreOutOfRange {
        entry: String,
        habitat: String,
        score: f64,
    },

    #[error("{entry}: active month out of range 1..=12: {month}")]
    MonthOutOfRange { entry: String, month: u32 },

    #[error("duplicate {table} entry: {name}")]
    DuplicateEntry { table: String, name: String },

    #[error("{rule}: taxonomic rule has no usable common-name patterns")]
    EmptyPatterns { rule: String },
}

impl PravenErrorCode for KnowledgeError {
    fn error_code(&self) -> &'static str {
        error_code::KNOWLEDGE_ERROR
    }
}
