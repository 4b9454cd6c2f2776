//! Stable error codes for collaborators that need machine-readable failures.

/// Every error enum exposes a structured code string.
pub trait PravenErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONTEXT_ERROR: &str = "CONTEXT_ERROR";
pub const KNOWLEDGE_ERROR: &str = "KNOWLEDGE_ERROR";
pub const SERVICE_TIMEOUT: &str = "SERVICE_TIMEOUT";
pub const SERVICE_ERROR: &str = "SERVICE_ERROR";
pub const CACHE_ERROR: &str = "CACHE_ERROR";
pub const RULE_ERROR: &str = "RULE_ERROR";
pub const REVIEW_ERROR: &str = "REVIEW_ERROR";
