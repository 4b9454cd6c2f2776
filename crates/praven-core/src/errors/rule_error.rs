use super::error_code::{self, PravenErrorCode};

/// Caller errors passed to a rule evaluator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
    #[error("hour out of range 0..=23: {hour}")]
    HourOutOfRange { hour: u32 },

    #[error("scoring weights must sum to 1.0, got {sum}")]
    WeightsDoNotSumToOne { sum: f64 },
}

impl PravenErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_ERROR
    }
}
