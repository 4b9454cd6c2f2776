//! Regional pre-fetch.
//!
//! Pulls every recent observation for a 1° grid cell once, keeps it in a
//! long-lived cache and answers [`IOccurrenceService`] checks from memory.
//! Per-detection lookups then cost no network calls.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use praven_cache::{CacheKey, FetchError, ResponseCache};
use praven_core::config::{CacheConfig, GeographicConfig};
use praven_core::errors::ServiceError;
use praven_core::models::{Observation, RecentOccurrence};
use praven_core::traits::{IOccurrenceService, IRecentObservationFeed};
use tracing::info;

use crate::distance::haversine_km;
use crate::timeout::call_with_timeout;

const SERVICE_NAME: &str = "regional_index";

/// Grid cell containing a point: integer parts of latitude and longitude.
pub fn region_code(lat: f64, lon: f64) -> String {
    format!("grid_{}_{}", lat.trunc() as i32, lon.trunc() as i32)
}

/// Bounds of the grid cell holding `value` along one axis. Truncation toward
/// zero makes the cell at index 0 span (-1, 1).
fn cell_span(value: f64) -> (f64, f64) {
    let t = value.trunc();
    let lo = if t <= 0.0 { t - 1.0 } else { t };
    let hi = if t >= 0.0 { t + 1.0 } else { t };
    (lo, hi)
}

/// Centre of the cell holding the point, and the distance from that centre
/// to the cell's farthest corner in kilometres.
pub fn cell_center(lat: f64, lon: f64) -> ((f64, f64), f64) {
    let (lat_lo, lat_hi) = cell_span(lat);
    let (lon_lo, lon_hi) = cell_span(lon);
    let (lat_lo, lat_hi) = (lat_lo.max(-90.0), lat_hi.min(90.0));
    let center = ((lat_lo + lat_hi) / 2.0, (lon_lo + lon_hi) / 2.0);
    let reach = [(lat_lo, lon_lo), (lat_lo, lon_hi), (lat_hi, lon_lo), (lat_hi, lon_hi)]
        .iter()
        .map(|(clat, clon)| haversine_km(center.0, center.1, *clat, *clon))
        .fold(0.0, f64::max);
    (center, reach)
}

/// Species and checklist counts for a set of observations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionSummary {
    pub species: BTreeSet<String>,
    pub observation_count: usize,
    pub checklist_count: usize,
}

impl RegionSummary {
    pub fn contains(&self, species: &str) -> bool {
        self.species.iter().any(|s| s.eq_ignore_ascii_case(species))
    }
}

pub fn summarize_observations(observations: &[Observation]) -> RegionSummary {
    let checklists: HashSet<&str> = observations.iter().map(|o| o.checklist_id.as_str()).collect();
    RegionSummary {
        species: observations
            .iter()
            .map(|o| o.species_common_name.clone())
            .collect(),
        observation_count: observations.len(),
        checklist_count: checklists.len(),
    }
}

/// In-memory occurrence index over pre-fetched regional observations.
pub struct RegionalOccurrenceIndex {
    feed: Arc<dyn IRecentObservationFeed>,
    cache: ResponseCache,
    radius_km: f64,
    days_back: u32,
    timeout: Duration,
}

impl RegionalOccurrenceIndex {
    pub fn new(
        feed: Arc<dyn IRecentObservationFeed>,
        cache: ResponseCache,
        radius_km: f64,
        days_back: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            feed,
            cache,
            radius_km,
            days_back,
            timeout,
        }
    }

    /// Index with the configured regional TTL, window and timeout.
    pub fn from_config(
        feed: Arc<dyn IRecentObservationFeed>,
        radius_km: f64,
        geographic: &GeographicConfig,
        cache: &CacheConfig,
    ) -> Self {
        Self::new(
            feed,
            ResponseCache::regional_from_config(cache),
            radius_km,
            geographic.recent_days_back,
            Duration::from_millis(geographic.timeout_ms),
        )
    }

    /// Fetch (or reuse) the observations of the cell containing the point.
    pub fn preload(&self, lat: f64, lon: f64) -> Result<RegionSummary, ServiceError> {
        let observations = self.observations(lat, lon)?;
        let summary = summarize_observations(&observations);
        info!(
            region = %region_code(lat, lon),
            species = summary.species.len(),
            observations = summary.observation_count,
            "regional observations loaded"
        );
        Ok(summary)
    }

    /// Observations of the whole cell. The fetch is centred on the cell and
    /// reaches `radius_km` beyond its corners, so any point in the cell sees
    /// everything within `radius_km` of itself.
    fn observations(&self, lat: f64, lon: f64) -> Result<Vec<Observation>, ServiceError> {
        let region = region_code(lat, lon);
        let ((center_lat, center_lon), reach) = cell_center(lat, lon);
        let key = CacheKey::new(SERVICE_NAME)
            .arg(region.as_str())
            .kwarg("radius_km", self.radius_km)
            .kwarg("days_back", self.days_back)
            .digest();

        let feed = self.feed.clone();
        let (fetch_radius, days_back) = (self.radius_km + reach, self.days_back);
        self.cache
            .get_or_try_fetch(&key, || {
                call_with_timeout(SERVICE_NAME, self.timeout, move || {
                    feed.recent_observations(center_lat, center_lon, fetch_radius, days_back)
                })
            })
            .map_err(|e| match e {
                FetchError::Upstream(e) => e,
                FetchError::RecentFailure(reason) => ServiceError::Transport {
                    service: SERVICE_NAME.to_string(),
                    reason,
                },
                FetchError::Cache(reason) => ServiceError::MalformedResponse {
                    service: SERVICE_NAME.to_string(),
                    reason,
                },
            })
    }
}

impl IOccurrenceService for RegionalOccurrenceIndex {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    /// Frequency is matching observations over unique checklists within `radius_km`.
    fn check(
        &self,
        species: &str,
        lat: f64,
        lon: f64,
        _date: NaiveDate,
        radius_km: f64,
    ) -> Result<RecentOccurrence, ServiceError> {
        let observations = self.observations(lat, lon)?;
        let nearby: Vec<&Observation> = observations
            .iter()
            .filter(|o| haversine_km(lat, lon, o.lat, o.lon) <= radius_km)
            .collect();
        if nearby.is_empty() {
            return Err(ServiceError::NoData {
                service: SERVICE_NAME.to_string(),
            });
        }

        let checklists: HashSet<&str> = nearby.iter().map(|o| o.checklist_id.as_str()).collect();
        let matching = nearby
            .iter()
            .filter(|o| o.species_common_name.eq_ignore_ascii_case(species))
            .count();

        Ok(RecentOccurrence {
            expected: matching > 0,
            frequency: Some((matching as f64 / checklists.len() as f64).min(1.0)),
            recent_count: matching as u32,
        })
    }
}
