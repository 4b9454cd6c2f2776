//! Occurrence service answers and the geographic signal built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Recent-observation service answer (eBird-style).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOccurrence {
    pub expected: bool,
    /// Share of recent checklists reporting the species.
    pub frequency: Option<f64>,
    pub recent_count: u32,
}

/// Historical occurrence-record service answer (GBIF-style).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceRecords {
    pub present: bool,
    pub count: u32,
    pub closest_distance_km: Option<f64>,
    pub months_recorded: Vec<u32>,
}

impl OccurrenceRecords {
    pub fn empty() -> Self {
        Self {
            present: false,
            count: 0,
            closest_distance_km: None,
            months_recorded: Vec::new(),
        }
    }
}

/// One raw observation from a recent-observation feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub species_common_name: String,
    /// Checklist (sampling event) the observation belongs to.
    pub checklist_id: String,
    pub lat: f64,
    pub lon: f64,
    pub observed_on: NaiveDate,
    pub count: Option<u32>,
}

/// Result of one external call: an answer, or the reason it degraded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ServiceOutcome<T> {
    Answered { value: T },
    Degraded { reason: String },
}

impl<T> ServiceOutcome<T> {
    pub fn answered(&self) -> Option<&T> {
        match self {
            ServiceOutcome::Answered { value } => Some(value),
            ServiceOutcome::Degraded { .. } => None,
        }
    }

    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            ServiceOutcome::Answered { .. } => None,
            ServiceOutcome::Degraded { reason } => Some(reason),
        }
    }
}

/// Occurrence evidence gathered for one detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicMetadata {
    pub recent: Option<RecentOccurrence>,
    pub records: Option<OccurrenceRecords>,
    pub occurrence_confidence: f64,
    /// Services that were configured but failed.
    pub degraded: Vec<String>,
}

/// Geographic signal for one detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum GeographicSignal {
    /// No occurrence service configured.
    Unavailable,
    /// At least one service answered.
    Assessed { metadata: GeographicMetadata },
    /// Services configured but none answered.
    Degraded { reasons: Vec<String> },
}

impl GeographicSignal {
    /// Occurrence confidence, if any service answered.
    pub fn confidence(&self) -> Option<f64> {
        match self {
            GeographicSignal::Assessed { metadata } => Some(metadata.occurrence_confidence),
            _ => None,
        }
    }

    pub fn metadata(&self) -> Option<&GeographicMetadata> {
        match self {
            GeographicSignal::Assessed { metadata } => Some(metadata),
            _ => None,
        }
    }

    /// Absence of evidence is never invalid: the signal is valid unless a
    /// service answered and neither confirmed the species.
    pub fn is_valid(&self) -> bool {
        match self {
            GeographicSignal::Assessed { metadata } => {
                let recent = metadata.recent.as_ref().map(|r| r.expected);
                let records = metadata.records.as_ref().map(|r| r.present);
                match (recent, records) {
                    (None, None) => true,
                    (r, g) => r.unwrap_or(false) || g.unwrap_or(false),
                }
            }
            _ => true,
        }
    }
}
