//! # praven-geographic
//!
//! Occurrence evidence for a detection. Every external call is cached and
//! bounded by a timeout; failures degrade to the neutral signal and are
//! reported as notes, never as errors.

pub mod confidence;
pub mod distance;
pub mod evaluator;
pub mod regional;
pub mod timeout;

pub use confidence::occurrence_confidence;
pub use distance::haversine_km;
pub use evaluator::{GeographicAssessment, GeographicEvaluator};
pub use regional::{cell_center, region_code, summarize_observations, RegionSummary, RegionalOccurrenceIndex};
pub use timeout::call_with_timeout;
