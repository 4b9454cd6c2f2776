use crate::models::{Detection, ValidationContext, ValidationResult};

/// Multi-signal detection validation.
pub trait IValidator: Send + Sync {
    /// Validate one detection against a survey context. Never fails: degraded
    /// or failed signals surface as REVIEW notes.
    fn validate_one(&self, detection: &Detection, ctx: &ValidationContext) -> ValidationResult;
}
