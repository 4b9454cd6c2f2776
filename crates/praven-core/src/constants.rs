//! Fixed biological and scoring constants shared by the evaluators.
//! Tunable values live in `config::defaults`.

/// Neutral score used whenever a signal has no information.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Oceanic preference at or above which a species may be a pelagic specialist.
pub const OCEANIC_SPECIALIST_MIN: f64 = 0.95;
/// Every non-oceanic preference of a pelagic specialist stays below this.
pub const OCEANIC_OTHER_MAX: f64 = 0.1;

/// Hour boundaries of the diel periods: night [0,6), dawn [6,9), day [9,17),
/// dusk [17,21), night [21,24).
pub const DAWN_START_HOUR: u32 = 6;
pub const DAY_START_HOUR: u32 = 9;
pub const DUSK_START_HOUR: u32 = 17;
pub const NIGHT_START_HOUR: u32 = 21;

/// Tolerance when checking that scoring weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Mean Earth radius used by great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Hybrid habitats must cover at least this share of mapped features.
pub const HYBRID_HABITAT_MIN_SHARE: f64 = 0.1;

/// Service labels used in degradation notes and cache keys.
pub const RECENT_SERVICE_NAME: &str = "recent_observations";
pub const RECORDS_SERVICE_NAME: &str = "occurrence_records";
