use super::error_code::{self, PravenErrorCode};

/// Invalid input to the post-hoc review step.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReviewError {
    #[error("unknown species decision {value:?}, expected \"accept\" or \"reject\"")]
    UnknownDecision { value: String },
}

impl PravenErrorCode for ReviewError {
    fn error_code(&self) -> &'static str {
        error_code::REVIEW_ERROR
    }
}
