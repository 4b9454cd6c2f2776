use serde::{Deserialize, Serialize};

use super::defaults;

/// Smart review selection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Maximum REVIEW detections kept per species.
    pub per_species_limit: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            per_species_limit: defaults::DEFAULT_PER_SPECIES_LIMIT,
        }
    }
}
