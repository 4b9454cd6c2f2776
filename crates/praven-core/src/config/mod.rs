//! Configuration system for Praven.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod cache_config;
pub mod context_config;
pub mod defaults;
pub mod geographic_config;
pub mod observability_config;
pub mod praven_config;
pub mod review_config;
pub mod scoring_config;
pub mod thresholds;
pub mod weather_config;

pub use cache_config::CacheConfig;
pub use context_config::ContextConfig;
pub use geographic_config::GeographicConfig;
pub use observability_config::ObservabilityConfig;
pub use praven_config::PravenConfig;
pub use review_config::ReviewConfig;
pub use scoring_config::ScoringConfig;
pub use thresholds::Thresholds;
pub use weather_config::WeatherConfig;
