use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ContextError;

/// Decision thresholds applied to one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Detector confidence below which a detection is flagged for review.
    pub min_confidence: f64,
    /// Habitat suitability below which the habitat signal is a hard rejection.
    pub habitat_min_score: f64,
    /// Search radius for occurrence services.
    pub geographic_radius_km: f64,
    /// Overall score needed for automatic acceptance.
    pub accept_score_threshold: f64,
    /// Detector confidence needed for automatic acceptance.
    pub accept_confidence_threshold: f64,
    /// Overall score below which a REVIEW gets an explanatory note.
    pub review_score_floor: f64,
    /// Weather activity score below which a REVIEW note is added.
    pub low_weather_score: f64,
    /// Region a native species is expected to come from.
    pub expected_region: String,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
            habitat_min_score: defaults::DEFAULT_HABITAT_MIN_SCORE,
            geographic_radius_km: defaults::DEFAULT_GEOGRAPHIC_RADIUS_KM,
            accept_score_threshold: defaults::DEFAULT_ACCEPT_SCORE_THRESHOLD,
            accept_confidence_threshold: defaults::DEFAULT_ACCEPT_CONFIDENCE_THRESHOLD,
            review_score_floor: defaults::DEFAULT_REVIEW_SCORE_FLOOR,
            low_weather_score: defaults::DEFAULT_LOW_WEATHER_SCORE,
            expected_region: defaults::DEFAULT_EXPECTED_REGION.to_string(),
        }
    }
}

impl Thresholds {
    /// Check that every unit-interval threshold lies in [0, 1] and the radius is positive.
    pub fn validate(&self) -> Result<(), ContextError> {
        let unit = [
            ("min_confidence", self.min_confidence),
            ("habitat_min_score", self.habitat_min_score),
            ("accept_score_threshold", self.accept_score_threshold),
            ("accept_confidence_threshold", self.accept_confidence_threshold),
            ("review_score_floor", self.review_score_floor),
            ("low_weather_score", self.low_weather_score),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ContextError::ThresholdOutOfRange {
                    name: name.to_string(),
                    value,
                });
            }
        }
        if !(self.geographic_radius_km > 0.0) {
            return Err(ContextError::ThresholdOutOfRange {
                name: "geographic_radius_km".to_string(),
                value: self.geographic_radius_km,
            });
        }
        Ok(())
    }
}
