use super::{
    CacheError, ConfigError, ContextError, KnowledgeError, PravenErrorCode, ReviewError,
    RuleError, ServiceError,
};

/// Top-level error type aggregating all subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum PravenError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("context error: {0}")]
    Context(#[from] ContextError),

    #[error("knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("review error: {0}")]
    Review(#[from] ReviewError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PravenErrorCode for PravenError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Context(e) => e.error_code(),
            Self::Knowledge(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Cache(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::Review(e) => e.error_code(),
            Self::Serialization(_) => super::error_code::CACHE_ERROR,
        }
    }
}

/// Convenience alias used throughout Praven.
pub type PravenResult<T> = Result<T, PravenError>;
