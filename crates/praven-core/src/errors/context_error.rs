use super::error_code::{self, PravenErrorCode};

/// Invalid survey context, raised synchronously while a context is built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContextError {
    #[error("latitude out of range [-90, 90]: {value}")]
    LatitudeOutOfRange { value: f64 },

    #[error("longitude out of range [-180, 180]: {value}")]
    LongitudeOutOfRange { value: f64 },

    #[error("malformed date '{value}': expected YYYY-MM-DD")]
    MalformedDate { value: String },

    #[error("malformed timestamp '{value}': {reason}")]
    MalformedTimestamp { value: String, reason: String },

    #[error("unknown habitat '{value}'")]
    UnknownHabitat { value: String },

    #[error("threshold {name} out of range [0, 1]: {value}")]
    ThresholdOutOfRange { name: String, value: f64 },
}

impl PravenErrorCode for ContextError {
    fn error_code(&self) -> &'static str {
        error_code::CONTEXT_ERROR
    }
}
