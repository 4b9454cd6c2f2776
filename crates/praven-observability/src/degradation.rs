//! Record degraded external signals: component, failure, fallback used,
//! timestamp, recovery status. Safe to share across batch worker threads.
//!
//! A component has at most one active episode. Repeated failures while it is
//! active only bump the episode's occurrence count, so a long batch against
//! a dead service holds one entry, not one per detection.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::tracing_setup::events;

/// One degradation occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

/// Recovery status of a degradation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still in degraded mode.
    Active,
    /// Recovered to normal operation.
    Recovered,
}

/// A degradation episode with recovery status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    /// The failure that opened the episode.
    pub event: DegradationEvent,
    /// Failures folded into this episode, the first included.
    pub occurrences: u64,
    pub last_seen: DateTime<Utc>,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Degradation events keyed by component.
#[derive(Debug, Default)]
pub struct DegradationTracker {
    events: DashMap<String, Vec<TrackedDegradation>>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure of `component`. Opens a new episode unless one is
    /// already active.
    pub fn record(&self, component: &str, failure: &str, fallback_used: &str) {
        let now = Utc::now();
        let opened = {
            let mut list = self.events.entry(component.to_string()).or_default();
            let active = list
                .last()
                .is_some_and(|t| t.recovery_status == RecoveryStatus::Active);
            if active {
                if let Some(last) = list.last_mut() {
                    last.occurrences += 1;
                    last.last_seen = now;
                }
                false
            } else {
                list.push(TrackedDegradation {
                    event: DegradationEvent {
                        component: component.to_string(),
                        failure: failure.to_string(),
                        fallback_used: fallback_used.to_string(),
                        timestamp: now,
                    },
                    occurrences: 1,
                    last_seen: now,
                    recovery_status: RecoveryStatus::Active,
                    recovered_at: None,
                });
                true
            }
        };
        if opened {
            events::degradation_triggered(component, failure, fallback_used);
        }
    }

    /// Close the active episode of `component`, if any. Returns whether one
    /// was closed.
    pub fn mark_recovered(&self, component: &str) -> bool {
        let recovered = match self.events.get_mut(component) {
            Some(mut list) => match list.last_mut() {
                Some(last) if last.recovery_status == RecoveryStatus::Active => {
                    last.recovery_status = RecoveryStatus::Recovered;
                    last.recovered_at = Some(Utc::now());
                    true
                }
                _ => false,
            },
            None => false,
        };
        if recovered {
            events::degradation_recovered(component);
        }
        recovered
    }

    pub fn is_active(&self, component: &str) -> bool {
        self.events.get(component).is_some_and(|list| {
            list.last()
                .is_some_and(|t| t.recovery_status == RecoveryStatus::Active)
        })
    }

    /// All events, oldest first.
    pub fn events(&self) -> Vec<TrackedDegradation> {
        let mut all: Vec<TrackedDegradation> = self
            .events
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|t| t.event.timestamp);
        all
    }

    /// Active (unrecovered) degradations.
    pub fn active_degradations(&self) -> Vec<TrackedDegradation> {
        self.events()
            .into_iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    /// Number of episodes recorded for `component`.
    pub fn count(&self, component: &str) -> usize {
        self.events.get(component).map_or(0, |list| list.len())
    }

    /// Failures recorded for `component` across all episodes.
    pub fn occurrences(&self, component: &str) -> u64 {
        self.events
            .get(component)
            .map_or(0, |list| list.iter().map(|t| t.occurrences).sum())
    }

    /// Episodes per component, sorted by component name.
    pub fn summary(&self) -> Vec<(String, usize)> {
        let mut summary: Vec<(String, usize)> = self
            .events
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().len()))
            .collect();
        summary.sort();
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&self) {
        self.events.clear();
    }
}
