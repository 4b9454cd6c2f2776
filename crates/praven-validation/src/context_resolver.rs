//! Pre-batch context resolution.
//!
//! A survey context may arrive without habitat or weather. Both are looked up
//! once, before evaluation starts, so providers are never called from the
//! batch workers. Provider failures degrade to an unknown habitat and default
//! weather.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveTime;
use praven_core::config::{ContextConfig, PravenConfig};
use praven_core::models::{Habitat, HabitatReport};
use praven_core::traits::{IHabitatProvider, IWeatherProvider};
use praven_core::{ValidationContext, WeatherConditions};
use praven_geographic::call_with_timeout;
use praven_observability::DegradationTracker;
use tracing::{debug, info};

const HABITAT_SERVICE: &str = "habitat";
const WEATHER_SERVICE: &str = "weather";

pub struct ContextResolver {
    habitat: Option<Arc<dyn IHabitatProvider>>,
    weather: Option<Arc<dyn IWeatherProvider>>,
    config: ContextConfig,
    timeout: Duration,
    degradation: Option<Arc<DegradationTracker>>,
}

impl ContextResolver {
    pub fn new(config: &PravenConfig) -> Self {
        Self {
            habitat: None,
            weather: None,
            config: config.context.clone(),
            timeout: Duration::from_millis(config.geographic.timeout_ms),
            degradation: None,
        }
    }

    pub fn with_habitat_provider(mut self, provider: Arc<dyn IHabitatProvider>) -> Self {
        self.habitat = Some(provider);
        self
    }

    pub fn with_weather_provider(mut self, provider: Arc<dyn IWeatherProvider>) -> Self {
        self.weather = Some(provider);
        self
    }

    pub fn with_degradation_tracker(mut self, tracker: Arc<DegradationTracker>) -> Self {
        self.degradation = Some(tracker);
        self
    }

    /// Complete `ctx`. Habitat and weather already present are kept as given.
    pub fn resolve(&self, ctx: &ValidationContext) -> ValidationContext {
        let mut resolved = ctx.clone();
        if resolved.habitat == Habitat::Unknown {
            if let Some(report) = self.lookup_habitat(ctx) {
                resolved.habitat = report.primary;
            }
        }
        if resolved.weather.is_none() {
            if let Some(weather) = self.lookup_weather(ctx) {
                resolved.weather = Some(weather);
            }
        }
        resolved
    }

    /// Habitat report for the context's location, or `None` without a provider.
    /// A failed lookup yields an unknown habitat.
    pub fn lookup_habitat(&self, ctx: &ValidationContext) -> Option<HabitatReport> {
        let provider = self.habitat.clone()?;
        let (lat, lon) = (ctx.location.lat, ctx.location.lon);
        let radius_m = self.config.habitat_radius_m;
        match call_with_timeout(HABITAT_SERVICE, self.timeout, move || {
            provider.get(lat, lon, radius_m)
        }) {
            Ok(report) => {
                self.recovered(HABITAT_SERVICE);
                info!(habitat = %report.describe(), "habitat resolved");
                Some(report)
            }
            Err(e) => {
                self.degraded(HABITAT_SERVICE, &e.to_string(), "unknown habitat");
                Some(HabitatReport::default())
            }
        }
    }

    /// Weather at the sample hour of the survey date, or `None` without a
    /// provider. A failed lookup yields default weather.
    pub fn lookup_weather(&self, ctx: &ValidationContext) -> Option<WeatherConditions> {
        let provider = self.weather.clone()?;
        let (lat, lon, date) = (ctx.location.lat, ctx.location.lon, ctx.date);
        let time =
            NaiveTime::from_hms_opt(self.config.weather_sample_hour, 0, 0).unwrap_or_default();
        match call_with_timeout(WEATHER_SERVICE, self.timeout, move || {
            provider.get(lat, lon, date, time)
        }) {
            Ok(weather) => {
                self.recovered(WEATHER_SERVICE);
                debug!(?weather, "weather resolved");
                Some(weather)
            }
            Err(e) => {
                self.degraded(WEATHER_SERVICE, &e.to_string(), "default weather");
                Some(WeatherConditions::default())
            }
        }
    }

    fn recovered(&self, component: &str) {
        if let Some(tracker) = &self.degradation {
            tracker.mark_recovered(component);
        }
    }

    fn degraded(&self, component: &str, failure: &str, fallback: &str) {
        match &self.degradation {
            Some(tracker) => tracker.record(component, failure, fallback),
            None => praven_observability::tracing_setup::events::degradation_triggered(
                component, failure, fallback,
            ),
        }
    }
}
