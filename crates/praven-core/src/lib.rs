//! # praven-core
//!
//! Foundation crate for the Praven validation engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{PravenConfig, Thresholds};
pub use errors::{PravenError, PravenResult};
pub use models::{
    Detection, EvaluatorResult, Habitat, Location, SpeciesProfile, ValidationContext,
    ValidationResult, ValidationStatus, WeatherConditions,
};
