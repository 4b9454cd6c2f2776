//! Weather-activity score.
//!
//! Advisory only: a low score adds a review note but never rejects. A
//! trained [`IActivityModel`] can replace the heuristic; until it reports
//! itself trained the heuristic answers.

use std::sync::Arc;

use praven_core::config::WeatherConfig;
use praven_core::traits::IActivityModel;
use praven_core::WeatherConditions;
use tracing::trace;

/// Temperature assumed when the reading is missing.
const FALLBACK_TEMPERATURE_C: f64 = 10.0;

/// Rule-based activity score in [0, 1].
///
/// Starts at 1.0 and subtracts for rain, fog, frost, heat and strong wind.
/// Species in `resilient` (exact common names) get +0.2.
pub fn predict_activity_score(
    species: &str,
    weather: &WeatherConditions,
    resilient: &[String],
) -> f64 {
    let mut score = 1.0;

    if weather.rain > 0.0 {
        score -= 0.1 + weather.rain * 0.3;
    }
    if weather.fog > 0.0 {
        score -= weather.fog * 0.1;
    }

    let temperature = weather.temperature_c.unwrap_or(FALLBACK_TEMPERATURE_C);
    if temperature < 0.0 {
        score -= 0.2;
    } else if temperature > 25.0 {
        score -= 0.1;
    }

    if weather.wind_speed.unwrap_or(0.0) > 10.0 {
        score -= 0.2;
    }

    if resilient.iter().any(|s| s == species) {
        score += 0.2;
    }

    clamp_score(score)
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Activity model used by the engine: a pluggable trained model with the
/// heuristic as fallback.
#[derive(Clone)]
pub struct WeatherActivityModel {
    trained: Option<Arc<dyn IActivityModel>>,
    resilient_species: Vec<String>,
}

impl WeatherActivityModel {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            trained: None,
            resilient_species: config.resilient_species.clone(),
        }
    }

    pub fn with_model(mut self, model: Arc<dyn IActivityModel>) -> Self {
        self.trained = Some(model);
        self
    }

    pub fn resilient_species(&self) -> &[String] {
        &self.resilient_species
    }

    /// Score for `species` under `weather`, clamped to [0, 1].
    pub fn score(&self, species: &str, weather: &WeatherConditions) -> f64 {
        match &self.trained {
            Some(model) if model.is_trained() => {
                trace!(species, "using trained activity model");
                clamp_score(model.predict_activity_score(species, weather))
            }
            _ => predict_activity_score(species, weather, &self.resilient_species),
        }
    }
}

impl Default for WeatherActivityModel {
    fn default() -> Self {
        Self::new(&WeatherConfig::default())
    }
}

impl std::fmt::Debug for WeatherActivityModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherActivityModel")
            .field("trained", &self.is_trained())
            .field("resilient_species", &self.resilient_species)
            .finish()
    }
}

impl IActivityModel for WeatherActivityModel {
    fn is_trained(&self) -> bool {
        self.trained.as_ref().is_some_and(|m| m.is_trained())
    }

    fn predict_activity_score(&self, species: &str, weather: &WeatherConditions) -> f64 {
        self.score(species, weather)
    }
}
