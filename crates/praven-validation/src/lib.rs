//! # praven-validation
//!
//! Decision engine for acoustic detections.
//!
//! - [`engine`]: per-detection state machine combining habitat, native range,
//!   diel period, occurrence and weather signals into ACCEPT / REJECT / REVIEW
//! - [`batch`]: order-preserving parallel batches with per-item isolation
//! - [`review`]: smart review selection and species-level decisions
//! - [`context_resolver`]: fills a batch context from habitat and weather providers

pub mod batch;
pub mod context_resolver;
pub mod engine;
pub mod review;

pub use batch::BatchStats;
pub use context_resolver::ContextResolver;
pub use engine::{geographic_from_config, ValidationEngine};
pub use review::{
    apply_species_decision, apply_species_decisions, review_by_species, select_for_review,
    select_for_review_with, ReviewCandidate, ReviewSummary, SpeciesDecision,
};
