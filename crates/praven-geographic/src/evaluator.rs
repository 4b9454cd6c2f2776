//! Geographic occurrence evaluator.
//!
//! Consults a recent-observation service and, when the detection carries a
//! scientific name, a historical records service. Both are optional. Calls
//! go through the shared [`ResponseCache`] and run under the configured
//! timeout. A failed call degrades that service to "no answer".

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use praven_cache::{CacheKey, FetchError, ResponseCache};
use praven_core::config::GeographicConfig;
use praven_core::constants::{RECENT_SERVICE_NAME, RECORDS_SERVICE_NAME};
use praven_core::errors::ServiceError;
use praven_core::models::{
    GeographicMetadata, GeographicSignal, Location, OccurrenceRecords, RecentOccurrence,
    ServiceOutcome,
};
use praven_core::traits::{IOccurrenceRecords, IOccurrenceService};
use praven_core::{Detection, ValidationContext};
use praven_observability::geographic_span;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::confidence::occurrence_confidence;
use crate::timeout::call_with_timeout;

/// Geographic signal plus the advisory notes produced while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeographicAssessment {
    pub signal: GeographicSignal,
    /// Review notes, in service order.
    pub notes: Vec<String>,
}

impl GeographicAssessment {
    pub fn unavailable() -> Self {
        Self {
            signal: GeographicSignal::Unavailable,
            notes: Vec::new(),
        }
    }
}

pub struct GeographicEvaluator {
    recent: Option<Arc<dyn IOccurrenceService>>,
    records: Option<Arc<dyn IOccurrenceRecords>>,
    cache: Arc<ResponseCache>,
    config: GeographicConfig,
}

impl GeographicEvaluator {
    pub fn new(config: GeographicConfig, cache: Arc<ResponseCache>) -> Self {
        Self {
            recent: None,
            records: None,
            cache,
            config,
        }
    }

    pub fn with_recent_service(mut self, service: Arc<dyn IOccurrenceService>) -> Self {
        self.recent = Some(service);
        self
    }

    pub fn with_records_service(mut self, service: Arc<dyn IOccurrenceRecords>) -> Self {
        self.records = Some(service);
        self
    }

    /// Enabled with at least one service attached.
    pub fn is_configured(&self) -> bool {
        self.config.enabled && (self.recent.is_some() || self.records.is_some())
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.config.timeout_ms)
    }

    /// Recent-observation check through cache and timeout.
    pub fn check_recent(
        &self,
        species: &str,
        lat: f64,
        lon: f64,
        date: NaiveDate,
        radius_km: f64,
    ) -> Option<ServiceOutcome<RecentOccurrence>> {
        let service = self.recent.clone()?;
        let key = CacheKey::new(RECENT_SERVICE_NAME)
            .arg(species)
            .arg(lat)
            .arg(lon)
            .arg(date.to_string())
            .arg(radius_km)
            .kwarg("provider", service.name())
            .digest();

        let name = service.name().to_string();
        let species = species.to_string();
        Some(self.cached_call(&key, &name, move || {
            service.check(&species, lat, lon, date, radius_km)
        }))
    }

    /// Historical records check for one month through cache and timeout.
    pub fn check_records(
        &self,
        scientific_name: &str,
        lat: f64,
        lon: f64,
        radius_km: f64,
        month: u32,
    ) -> Option<ServiceOutcome<OccurrenceRecords>> {
        let service = self.records.clone()?;
        let years_back = self.config.years_back;
        let key = CacheKey::new(RECORDS_SERVICE_NAME)
            .arg(scientific_name)
            .arg(lat)
            .arg(lon)
            .arg(radius_km)
            .kwarg("months", vec![month])
            .kwarg("years_back", years_back)
            .kwarg("provider", service.name())
            .digest();

        let name = service.name().to_string();
        let scientific_name = scientific_name.to_string();
        Some(self.cached_call(&key, &name, move || {
            service.check(&scientific_name, lat, lon, radius_km, &[month], years_back)
        }))
    }

    fn cached_call<T, F>(&self, key: &str, service: &str, call: F) -> ServiceOutcome<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    {
        let timeout = self.timeout();
        let fetched = self
            .cache
            .get_or_try_fetch(key, || call_with_timeout(service, timeout, call));
        match fetched {
            Ok(value) => ServiceOutcome::Answered { value },
            Err(FetchError::Upstream(e)) => {
                warn!(service, error = %e, "occurrence service degraded");
                ServiceOutcome::Degraded {
                    reason: e.to_string(),
                }
            }
            Err(FetchError::RecentFailure(reason)) => {
                debug!(service, reason = %reason, "occurrence service recently failed, not retried");
                ServiceOutcome::Degraded { reason }
            }
            Err(FetchError::Cache(reason)) => {
                warn!(service, reason = %reason, "occurrence answer could not be cached");
                ServiceOutcome::Degraded { reason }
            }
        }
    }

    /// Assess one detection at the context's location.
    pub fn evaluate(&self, detection: &Detection, ctx: &ValidationContext) -> GeographicAssessment {
        if !self.is_configured() {
            return GeographicAssessment::unavailable();
        }
        let span = geographic_span!(detection.species_common_name);
        let _guard = span.enter();

        let species = detection.species_common_name.as_str();
        let Location { lat, lon } = ctx.location;
        let radius = ctx.thresholds.geographic_radius_km;
        let date = detection.timestamp.date();
        let month = date.month();

        let recent = self.check_recent(species, lat, lon, date, radius);
        let records = detection
            .species_scientific_name
            .as_deref()
            .and_then(|sci| self.check_records(sci, lat, lon, radius, month));

        let mut notes = Vec::new();
        let mut degraded = Vec::new();
        let mut reasons = Vec::new();

        if let Some(outcome) = &recent {
            match outcome {
                ServiceOutcome::Answered { value } if !value.expected => notes.push(format!(
                    "Recent observations: {species} not observed within {radius} km \
                     in the last {} days ({lat:.3}, {lon:.3})",
                    self.config.recent_days_back
                )),
                ServiceOutcome::Answered { .. } => {}
                ServiceOutcome::Degraded { reason } => {
                    notes.push(format!("Recent observations unavailable: {reason}"));
                    degraded.push(RECENT_SERVICE_NAME.to_string());
                    reasons.push(reason.clone());
                }
            }
        }

        if let (Some(outcome), Some(sci)) = (&records, detection.species_scientific_name.as_deref())
        {
            match outcome {
                ServiceOutcome::Answered { value } if !value.present => notes.push(format!(
                    "Occurrence records: {sci} has no records within {radius} km \
                     for month {month} (last {} years)",
                    self.config.years_back
                )),
                ServiceOutcome::Answered { .. } => {}
                ServiceOutcome::Degraded { reason } => {
                    notes.push(format!("Occurrence records unavailable: {reason}"));
                    degraded.push(RECORDS_SERVICE_NAME.to_string());
                    reasons.push(reason.clone());
                }
            }
        }

        let recent_value = recent.as_ref().and_then(|o| o.answered()).cloned();
        let records_value = records.as_ref().and_then(|o| o.answered()).cloned();

        let signal = if recent_value.is_some() || records_value.is_some() {
            let occurrence_confidence =
                occurrence_confidence(recent_value.as_ref(), records_value.as_ref());
            GeographicSignal::Assessed {
                metadata: GeographicMetadata {
                    recent: recent_value,
                    records: records_value,
                    occurrence_confidence,
                    degraded,
                },
            }
        } else if !reasons.is_empty() {
            GeographicSignal::Degraded { reasons }
        } else {
            GeographicSignal::Unavailable
        };

        debug!(species, confidence = ?signal.confidence(), "geographic assessment");
        GeographicAssessment { signal, notes }
    }
}
