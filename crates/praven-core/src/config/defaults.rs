// Single source of truth for all default values.

// --- Thresholds ---
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.1;
pub const DEFAULT_HABITAT_MIN_SCORE: f64 = 0.3;
pub const DEFAULT_GEOGRAPHIC_RADIUS_KM: f64 = 50.0;
pub const DEFAULT_ACCEPT_SCORE_THRESHOLD: f64 = 0.7;
pub const DEFAULT_ACCEPT_CONFIDENCE_THRESHOLD: f64 = 0.7;
pub const DEFAULT_REVIEW_SCORE_FLOOR: f64 = 0.4;
pub const DEFAULT_LOW_WEATHER_SCORE: f64 = 0.3;
pub const DEFAULT_EXPECTED_REGION: &str = "Europe";

// --- Scoring ---
pub const DEFAULT_HABITAT_WEIGHT: f64 = 0.3;
pub const DEFAULT_TEMPORAL_WEIGHT: f64 = 0.2;
pub const DEFAULT_GEOGRAPHIC_WEIGHT: f64 = 0.3;
pub const DEFAULT_CONFIDENCE_WEIGHT: f64 = 0.2;
pub const DEFAULT_NEUTRAL_GEOGRAPHIC_CONFIDENCE: f64 = 0.5;

// --- Geographic ---
pub const DEFAULT_GEOGRAPHIC_ENABLED: bool = true;
pub const DEFAULT_YEARS_BACK: u32 = 10;
pub const DEFAULT_SERVICE_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_RECENT_DAYS_BACK: u32 = 30;

// --- Cache ---
pub const DEFAULT_CACHE_TTL_HOURS: u64 = 24;
pub const DEFAULT_REGIONAL_TTL_DAYS: u64 = 7;
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;
/// How long a failed upstream call is remembered before it is retried.
pub const DEFAULT_CACHE_FAILURE_TTL_SECS: u64 = 60;

// --- Weather ---
pub const DEFAULT_RESILIENT_SPECIES: &[&str] = &[
    "Graylag Goose",
    "Pink-footed Goose",
    "Mallard",
    "Greater White-fronted Goose",
    "Barnacle Goose",
];
pub const DEFAULT_WEATHER_SAMPLE_HOUR: u32 = 12;

// --- Habitat lookup ---
pub const DEFAULT_HABITAT_RADIUS_M: u32 = 1000;

// --- Review ---
pub const DEFAULT_PER_SPECIES_LIMIT: usize = 3;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
