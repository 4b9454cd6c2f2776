//! Top-level Praven configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    CacheConfig, ContextConfig, GeographicConfig, ObservabilityConfig, ReviewConfig,
    ScoringConfig, Thresholds, WeatherConfig,
};
use crate::errors::ConfigError;

/// Name of the project config file looked up by [`PravenConfig::load`].
pub const CONFIG_FILE_NAME: &str = "praven.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`PRAVEN_*`)
/// 2. Project config (`praven.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PravenConfig {
    pub thresholds: Thresholds,
    pub scoring: ScoringConfig,
    pub geographic: GeographicConfig,
    pub cache: CacheConfig,
    pub weather: WeatherConfig,
    pub context: ContextConfig,
    pub review: ReviewConfig,
    pub observability: ObservabilityConfig,
}

impl PravenConfig {
    /// Load configuration from `praven.toml` in `root` (if present), then
    /// apply `PRAVEN_*` environment overrides and validate.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `PRAVEN_*` overrides read through `lookup`.
    /// Unparseable values are ignored and the previous value is kept.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
            raw.and_then(|v| v.trim().parse::<T>().ok())
        }

        if let Some(v) = parsed(lookup("PRAVEN_MIN_CONFIDENCE")) {
            self.thresholds.min_confidence = v;
        }
        if let Some(v) = parsed(lookup("PRAVEN_HABITAT_MIN_SCORE")) {
            self.thresholds.habitat_min_score = v;
        }
        if let Some(v) = parsed(lookup("PRAVEN_GEOGRAPHIC_RADIUS_KM")) {
            self.thresholds.geographic_radius_km = v;
        }
        if let Some(v) = lookup("PRAVEN_EXPECTED_REGION") {
            self.thresholds.expected_region = v;
        }
        if let Some(v) = parsed(lookup("PRAVEN_GEOGRAPHIC_ENABLED")) {
            self.geographic.enabled = v;
        }
        if let Some(v) = parsed(lookup("PRAVEN_GEOGRAPHIC_TIMEOUT_MS")) {
            self.geographic.timeout_ms = v;
        }
        if let Some(v) = parsed(lookup("PRAVEN_CACHE_TTL_HOURS")) {
            self.cache.ttl_hours = v;
        }
        if let Some(v) = parsed(lookup("PRAVEN_CACHE_FAILURE_TTL_SECS")) {
            self.cache.failure_ttl_secs = v;
        }
        if let Some(v) = lookup("PRAVEN_CACHE_PATH") {
            self.cache.persistent_path = Some(v.into());
        }
        if let Some(v) = parsed(lookup("PRAVEN_REVIEW_PER_SPECIES_LIMIT")) {
            self.review.per_species_limit = v;
        }
        if let Some(v) = lookup("PRAVEN_LOG_LEVEL") {
            self.observability.log_level = v;
        }
        if let Some(v) = parsed(lookup("PRAVEN_LOG_JSON")) {
            self.observability.json = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds
            .validate()
            .map_err(|e| ConfigError::ValidationFailed {
                field: "thresholds".to_string(),
                message: e.to_string(),
            })?;
        self.scoring
            .validate()
            .map_err(|e| ConfigError::ValidationFailed {
                field: "scoring".to_string(),
                message: e.to_string(),
            })?;
        if !(0.0..=1.0).contains(&self.scoring.neutral_geographic_confidence) {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.neutral_geographic_confidence".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if self.geographic.timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "geographic.timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.cache.ttl_hours == 0 || self.cache.regional_ttl_days == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "cache".to_string(),
                message: "TTLs must be greater than 0".to_string(),
            });
        }
        if self.cache.max_entries == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "cache.max_entries".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.review.per_species_limit == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "review.per_species_limit".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.context.weather_sample_hour > 23 {
            return Err(ConfigError::ValidationFailed {
                field: "context.weather_sample_hour".to_string(),
                message: "must be between 0 and 23".to_string(),
            });
        }
        Ok(())
    }
}
