use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::errors::RuleError;

/// Weights of the four signals in the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub habitat_weight: f64,
    pub temporal_weight: f64,
    pub geographic_weight: f64,
    pub confidence_weight: f64,
    /// Geographic confidence used when no occurrence service answered.
    pub neutral_geographic_confidence: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            habitat_weight: defaults::DEFAULT_HABITAT_WEIGHT,
            temporal_weight: defaults::DEFAULT_TEMPORAL_WEIGHT,
            geographic_weight: defaults::DEFAULT_GEOGRAPHIC_WEIGHT,
            confidence_weight: defaults::DEFAULT_CONFIDENCE_WEIGHT,
            neutral_geographic_confidence: defaults::DEFAULT_NEUTRAL_GEOGRAPHIC_CONFIDENCE,
        }
    }
}

impl ScoringConfig {
    pub fn weight_sum(&self) -> f64 {
        self.habitat_weight + self.temporal_weight + self.geographic_weight + self.confidence_weight
    }

    /// Weights must be non-negative and sum to one.
    pub fn validate(&self) -> Result<(), RuleError> {
        let sum = self.weight_sum();
        let any_negative = [
            self.habitat_weight,
            self.temporal_weight,
            self.geographic_weight,
            self.confidence_weight,
        ]
        .iter()
        .any(|w| *w < 0.0);
        if any_negative || (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(RuleError::WeightsDoNotSumToOne { sum });
        }
        Ok(())
    }
}
