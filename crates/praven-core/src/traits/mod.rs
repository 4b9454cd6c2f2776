//! Capabilities supplied by collaborators, and the validator exposed to them.

pub mod activity_model;
pub mod clock;
pub mod occurrence;
pub mod providers;
pub mod validator;

pub use activity_model::IActivityModel;
pub use clock::{Clock, ManualClock, SystemClock};
pub use occurrence::{IOccurrenceRecords, IOccurrenceService, IRecentObservationFeed};
pub use providers::{IHabitatProvider, IWeatherProvider};
pub use validator::IValidator;
