use super::error_code::{self, PravenErrorCode};

/// Failures of external occurrence, weather and habitat providers.
///
/// These never abort a batch. Callers turn them into degraded signals.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("{service} timed out after {timeout_ms}ms")]
    Timeout { service: String, timeout_ms: u64 },

    #[error("{service} transport failure: {reason}")]
    Transport { service: String, reason: String },

    #[error("{service} returned a malformed response: {reason}")]
    MalformedResponse { service: String, reason: String },

    #[error("{service} has no data for this query")]
    NoData { service: String },
}

impl PravenErrorCode for ServiceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => error_code::SERVICE_TIMEOUT,
            _ => error_code::SERVICE_ERROR,
        }
    }
}
