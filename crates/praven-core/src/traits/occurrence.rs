use chrono::NaiveDate;

use crate::errors::ServiceError;
use crate::models::{Observation, OccurrenceRecords, RecentOccurrence};

/// Recent-observation service: is the species currently being reported nearby?
pub trait IOccurrenceService: Send + Sync {
    /// Short label used in logs, notes and cache keys.
    fn name(&self) -> &str;

    fn check(
        &self,
        species: &str,
        lat: f64,
        lon: f64,
        date: NaiveDate,
        radius_km: f64,
    ) -> Result<RecentOccurrence, ServiceError>;
}

/// Historical occurrence-record service, queried by scientific name.
pub trait IOccurrenceRecords: Send + Sync {
    fn name(&self) -> &str;

    fn check(
        &self,
        scientific_name: &str,
        lat: f64,
        lon: f64,
        radius_km: f64,
        months: &[u32],
        years_back: u32,
    ) -> Result<OccurrenceRecords, ServiceError>;
}

/// Raw feed of recent observations around a point, used to pre-fetch a region.
pub trait IRecentObservationFeed: Send + Sync {
    fn recent_observations(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
        days_back: u32,
    ) -> Result<Vec<Observation>, ServiceError>;
}
