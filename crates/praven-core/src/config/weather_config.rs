use serde::{Deserialize, Serialize};

use super::defaults;

/// Weather-activity heuristic configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Species that stay active in poor weather (exact common names).
    pub resilient_species: Vec<String>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            resilient_species: defaults::DEFAULT_RESILIENT_SPECIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
