//! Error types for every Praven subsystem.
//!
//! Each subsystem owns a `thiserror` enum; [`PravenError`] aggregates them so
//! callers that cross subsystem boundaries can use `?` throughout.

pub mod cache_error;
pub mod config_error;
pub mod context_error;
pub mod error_code;
pub mod knowledge_error;
pub mod praven_error;
pub mod review_error;
pub mod rule_error;
pub mod service_error;

pub use cache_error::CacheError;
pub use config_error::ConfigError;
pub use context_error::ContextError;
pub use error_code::PravenErrorCode;
pub use knowledge_error::KnowledgeError;
pub use praven_error::{PravenError, PravenResult};
pub use review_error::ReviewError;
pub use rule_error::RuleError;
pub use service_error::ServiceError;
