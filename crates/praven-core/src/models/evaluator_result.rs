use serde::{Deserialize, Serialize};

/// Partial validity signal produced by one rule evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorResult {
    pub valid: bool,
    /// Only set when `valid` is false.
    pub reason: Option<String>,
    /// Contribution to the weighted aggregate, in [0, 1].
    pub score: f64,
    /// Diel period for the temporal evaluator, matched habitat for the habitat evaluator.
    pub detail: String,
    /// Non-fatal notes, in evaluation order.
    pub warnings: Vec<String>,
}

impl EvaluatorResult {
    pub fn pass(score: f64, detail: impl Into<String>) -> Self {
        Self {
            valid: true,
            reason: None,
            score: score.clamp(0.0, 1.0),
            detail: detail.into(),
            warnings: Vec::new(),
        }
    }

    pub fn fail(reason: impl Into<String>, score: f64, detail: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
            score: score.clamp(0.0, 1.0),
            detail: detail.into(),
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}
