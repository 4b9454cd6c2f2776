use serde::{Deserialize, Serialize};

use super::defaults;

/// How missing habitat and weather are looked up before a batch starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Hour of the survey date used for the batch-wide weather lookup.
    pub weather_sample_hour: u32,
    /// Radius of the map-feature lookup around the survey location.
    pub habitat_radius_m: u32,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            weather_sample_hour: defaults::DEFAULT_WEATHER_SAMPLE_HOUR,
            habitat_radius_m: defaults::DEFAULT_HABITAT_RADIUS_M,
        }
    }
}
