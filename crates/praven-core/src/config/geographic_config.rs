use serde::{Deserialize, Serialize};

use super::defaults;

/// Occurrence service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeographicConfig {
    /// Consult occurrence services at all.
    pub enabled: bool,
    /// How far back the records service looks.
    pub years_back: u32,
    /// Upper bound on a single service call.
    pub timeout_ms: u64,
    /// Window of the recent-observation feed.
    pub recent_days_back: u32,
}

impl Default for GeographicConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_GEOGRAPHIC_ENABLED,
            years_back: defaults::DEFAULT_YEARS_BACK,
            timeout_ms: defaults::DEFAULT_SERVICE_TIMEOUT_MS,
            recent_days_back: defaults::DEFAULT_RECENT_DAYS_BACK,
        }
    }
}
