//! # praven-observability
//!
//! Tracing setup, span macros and degradation tracking.
//!
//! ## Modules
//!
//! - `tracing_setup`: subscriber initialisation, spans, structured events
//! - `degradation`: concurrent record of degraded external signals

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{DegradationEvent, DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
