//! # praven-rules
//!
//! Pure evaluators over the knowledge base. Each returns an
//! [`EvaluatorResult`](praven_core::EvaluatorResult) and never touches the network.
//!
//! - [`temporal`]: diel period and seasonality
//! - [`habitat`]: habitat suitability and native range
//! - [`weather`]: weather-activity score, advisory only

pub mod habitat;
pub mod temporal;
pub mod weather;

pub use habitat::{check_native_region, evaluate_habitat, preferred_habitats};
pub use temporal::{diel_period, evaluate_detection_time, evaluate_temporal, DielPeriod};
pub use weather::{predict_activity_score, WeatherActivityModel};
