//! Detector output to be judged.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::ContextError;

/// One timestamped, scored species observation. Immutable input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub species_common_name: String,
    pub species_scientific_name: Option<String>,
    /// Local wall-clock time of the detection.
    pub timestamp: NaiveDateTime,
    /// Detector confidence in [0, 1].
    pub detector_confidence: f64,
}

impl Detection {
    pub fn new(
        species_common_name: impl Into<String>,
        timestamp: NaiveDateTime,
        detector_confidence: f64,
    ) -> Self {
        Self {
            species_common_name: species_common_name.into(),
            species_scientific_name: None,
            timestamp,
            detector_confidence,
        }
    }

    pub fn with_scientific_name(mut self, name: impl Into<String>) -> Self {
        self.species_scientific_name = Some(name.into());
        self
    }

    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }

    /// True when the detector confidence is a finite value in [0, 1].
    pub fn has_valid_confidence(&self) -> bool {
        self.detector_confidence.is_finite() && (0.0..=1.0).contains(&self.detector_confidence)
    }
}

/// Parse a detection timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM[:SS]`, RFC 3339 / ISO 8601 (`T` separator, optional
/// offset, which is dropped to keep local wall-clock time), or a bare
/// `HH:MM[:SS]` combined with `survey_date`.
pub fn parse_timestamp(
    raw: &str,
    survey_date: Option<NaiveDate>,
) -> Result<NaiveDateTime, ContextError> {
    let value = raw.trim();

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.naive_local());
    }

    for fmt in ["%H:%M:%S", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(value, fmt) {
            return match survey_date {
                Some(date) => Ok(date.and_time(time)),
                None => Err(ContextError::MalformedTimestamp {
                    value: raw.to_string(),
                    reason: "time of day given without a survey date".to_string(),
                }),
            };
        }
    }

    Err(ContextError::MalformedTimestamp {
        value: raw.to_string(),
        reason: "unrecognized timestamp format".to_string(),
    })
}
