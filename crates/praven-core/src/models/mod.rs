//! Data model shared by every Praven crate.

pub mod context;
pub mod detection;
pub mod evaluator_result;
pub mod geographic;
pub mod habitat;
pub mod species_profile;
pub mod validation_result;
pub mod weather;

pub use context::{Location, ValidationContext, ValidationContextBuilder};
pub use detection::{parse_timestamp, Detection};
pub use evaluator_result::EvaluatorResult;
pub use geographic::{
    GeographicMetadata, GeographicSignal, Observation, OccurrenceRecords, RecentOccurrence,
    ServiceOutcome,
};
pub use habitat::{Habitat, HabitatPreferences, HabitatReport};
pub use species_profile::{
    ActivityPattern, MigrationStatus, ProfileSource, ResolvedProfile, SpeciesProfile,
};
pub use validation_result::{ValidationResult, ValidationStatus};
pub use weather::{normalize_precipitation, normalize_visibility, WeatherConditions};
