//! Test fixture loader for Praven golden scenarios.
//!
//! Fixtures live in the workspace-level `test-fixtures/` directory and are
//! found from any crate by walking up from `CARGO_MANIFEST_DIR`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("golden").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

// ─── Golden scenarios ────────────────────────────────────────────────────────

/// Survey context of a golden scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioContext {
    pub lat: f64,
    pub lon: f64,
    pub date: String,
    pub habitat: String,
}

/// Detection of a golden scenario. `timestamp` is `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioDetection {
    pub species: String,
    #[serde(default)]
    pub scientific_name: Option<String>,
    pub timestamp: String,
    pub confidence: f64,
}

/// What the engine must produce for a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioExpectation {
    /// `ACCEPT`, `REJECT` or `REVIEW`.
    pub status: String,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub review_notes: Option<Vec<String>>,
    #[serde(default)]
    pub temporal_period: Option<String>,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub habitat_valid: Option<bool>,
    #[serde(default)]
    pub temporal_valid: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub name: String,
    pub context: ScenarioContext,
    pub detection: ScenarioDetection,
    pub expected: ScenarioExpectation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenarios {
    pub scenarios: Vec<GoldenScenario>,
}

/// Load `golden/scenarios.json`.
pub fn load_golden_scenarios() -> Vec<GoldenScenario> {
    load_fixture::<GoldenScenarios>("golden/scenarios.json").scenarios
}
