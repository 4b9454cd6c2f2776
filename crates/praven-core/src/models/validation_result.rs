use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Detection, GeographicMetadata, ProfileSource};

/// Terminal decision for a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Accept,
    Reject,
    Review,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Accept => "ACCEPT",
            ValidationStatus::Reject => "REJECT",
            ValidationStatus::Review => "REVIEW",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating one detection.
///
/// Holds no wall-clock data, so re-evaluating the same input yields an
/// identical record. Only the species-decision step mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub species: String,
    pub scientific_name: Option<String>,
    pub timestamp: NaiveDateTime,
    pub confidence: f64,
    pub status: ValidationStatus,
    pub geographic_valid: bool,
    pub temporal_valid: bool,
    pub habitat_valid: bool,
    pub temporal_period: String,
    pub overall_score: f64,
    /// All hard-rejection reasons, `"; "`-joined.
    pub rejection_reason: Option<String>,
    pub review_notes: Vec<String>,
    pub weather_score: Option<f64>,
    pub geographic: Option<GeographicMetadata>,
    pub profile_source: ProfileSource,
    /// Set when a reviewer decided the whole species after the fact.
    pub review_decision: Option<String>,
}

impl ValidationResult {
    /// REVIEW record for a detection whose evaluation could not complete.
    pub fn review_only(detection: &Detection, note: impl Into<String>) -> Self {
        Self {
            species: detection.species_common_name.clone(),
            scientific_name: detection.species_scientific_name.clone(),
            timestamp: detection.timestamp,
            confidence: detection.detector_confidence,
            status: ValidationStatus::Review,
            geographic_valid: true,
            temporal_valid: true,
            habitat_valid: true,
            temporal_period: "unknown".to_string(),
            overall_score: 0.0,
            rejection_reason: None,
            review_notes: vec![note.into()],
            weather_score: None,
            geographic: None,
            profile_source: ProfileSource::Unknown,
            review_decision: None,
        }
    }

    pub fn is_review(&self) -> bool {
        self.status == ValidationStatus::Review
    }
}
