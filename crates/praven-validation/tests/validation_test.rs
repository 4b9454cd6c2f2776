//! Decision engine tests: golden scenarios, degraded signals, advisory notes
//! and configuration failures.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use praven_cache::ResponseCache;
use praven_core::config::GeographicConfig;
use praven_core::errors::ServiceError;
use praven_core::models::{parse_timestamp, ProfileSource, RecentOccurrence};
use praven_core::traits::{IActivityModel, IOccurrenceService, IValidator};
use praven_core::{
    Detection, Habitat, PravenConfig, PravenError, ValidationContext, ValidationStatus,
    WeatherConditions,
};
use praven_geographic::GeographicEvaluator;
use praven_knowledge::KnowledgeBase;
use praven_validation::{geographic_from_config, ValidationEngine};
use test_fixtures::load_golden_scenarios;

// ─── Helpers ─────────────────────────────────────────────────────────────

fn make_engine() -> ValidationEngine {
    let kb = Arc::new(KnowledgeBase::bundled().unwrap());
    ValidationEngine::new(kb, &PravenConfig::default()).unwrap()
}

fn make_context(habitat: Habitat) -> ValidationContext {
    ValidationContext::builder(63.341, 10.215, "2025-05-14")
        .habitat(habitat)
        .build()
        .unwrap()
}

fn make_detection(species: &str, timestamp: &str, confidence: f64) -> Detection {
    Detection::new(species, parse_timestamp(timestamp, None).unwrap(), confidence)
}

struct MockRecent {
    answer: Result<RecentOccurrence, ServiceError>,
    calls: AtomicUsize,
}

impl MockRecent {
    fn new(answer: Result<RecentOccurrence, ServiceError>) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: AtomicUsize::new(0),
        })
    }
}

impl IOccurrenceService for MockRecent {
    fn name(&self) -> &str {
        "mock_recent"
    }

    fn check(
        &self,
        _species: &str,
        _lat: f64,
        _lon: f64,
        _date: NaiveDate,
        _radius_km: f64,
    ) -> Result<RecentOccurrence, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

fn make_geographic(service: Arc<MockRecent>) -> Arc<GeographicEvaluator> {
    let cache = Arc::new(ResponseCache::new(Duration::from_secs(3600), 100));
    Arc::new(
        GeographicEvaluator::new(GeographicConfig::default(), cache).with_recent_service(service),
    )
}

// ─── Golden scenarios ────────────────────────────────────────────────────

#[test]
fn golden_scenarios() {
    let engine = make_engine();
    let scenarios = load_golden_scenarios();
    assert!(!scenarios.is_empty());

    for scenario in scenarios {
        let ctx = ValidationContext::builder(
            scenario.context.lat,
            scenario.context.lon,
            scenario.context.date.clone(),
        )
        .habitat_name(scenario.context.habitat.clone())
        .build()
        .unwrap();
        let mut detection = make_detection(
            &scenario.detection.species,
            &scenario.detection.timestamp,
            scenario.detection.confidence,
        );
        if let Some(sci) = &scenario.detection.scientific_name {
            detection = detection.with_scientific_name(sci.clone());
        }

        let result = engine.validate_one(&detection, &ctx);
        let name = scenario.name.as_str();
        let expected = &scenario.expected;

        assert_eq!(result.status.as_str(), expected.status, "{name}: status");
        if let Some(reason) = &expected.rejection_reason {
            assert_eq!(result.rejection_reason.as_deref(), Some(reason.as_str()), "{name}");
        }
        if expected.status != "REJECT" {
            assert!(result.rejection_reason.is_none(), "{name}: unexpected rejection");
        }
        if let Some(notes) = &expected.review_notes {
            assert_eq!(&result.review_notes, notes, "{name}: notes");
        }
        if let Some(period) = &expected.temporal_period {
            assert_eq!(&result.temporal_period, period, "{name}: period");
        }
        if let Some(score) = expected.overall_score {
            assert!(
                (result.overall_score - score).abs() < 1e-9,
                "{name}: overall {} != {score}",
                result.overall_score
            );
        }
        if let Some(valid) = expected.habitat_valid {
            assert_eq!(result.habitat_valid, valid, "{name}: habitat_valid");
        }
        if let Some(valid) = expected.temporal_valid {
            assert_eq!(result.temporal_valid, valid, "{name}: temporal_valid");
        }
    }
}

#[test]
fn woodpecker_rejection_names_temporal_impossibility() {
    let engine = make_engine();
    let result = engine.validate_one(
        &make_detection("Lesser Spotted Woodpecker", "2025-05-14 23:00", 0.9),
        &make_context(Habitat::Forest),
    );
    assert_eq!(result.status, ValidationStatus::Reject);
    assert!(result
        .rejection_reason
        .unwrap()
        .to_lowercase()
        .contains("temporal impossibility"));
    assert_eq!(result.profile_source, ProfileSource::Family("Picidae".to_string()));
}

#[test]
fn unknown_species_is_never_rejected() {
    let engine = make_engine();
    for habitat in [Habitat::Oceanic, Habitat::Urban, Habitat::Unknown] {
        let ctx = make_context(habitat);
        for hour in 0..24 {
            let ts = format!("2025-05-14 {hour:02}:30");
            let result = engine.validate_one(&make_detection("Xyzzy Bird", &ts, 0.99), &ctx);
            assert_ne!(result.status, ValidationStatus::Reject, "hour {hour}");
            assert_eq!(result.profile_source, ProfileSource::Unknown);
        }
    }
}

// ─── Input and configuration errors ──────────────────────────────────────

#[test]
fn invalid_confidence_goes_to_review() {
    let engine = make_engine();
    let ctx = make_context(Habitat::Wetland);
    for confidence in [f64::NAN, 1.5, -0.1] {
        let result = engine.validate_one(
            &make_detection("Great Snipe", "2025-05-14 20:00", confidence),
            &ctx,
        );
        assert_eq!(result.status, ValidationStatus::Review);
        assert_eq!(result.review_notes.len(), 1);
        assert!(result.review_notes[0].starts_with("Invalid detector confidence"));
    }
}

#[test]
fn weights_not_summing_to_one_are_rejected() {
    let kb = Arc::new(KnowledgeBase::bundled().unwrap());
    let mut config = PravenConfig::default();
    config.scoring.habitat_weight = 0.5;
    assert!(matches!(
        ValidationEngine::new(kb, &config),
        Err(PravenError::Config(_))
    ));
}

#[test]
fn custom_weights_change_the_score() {
    let kb = Arc::new(KnowledgeBase::bundled().unwrap());
    let mut config = PravenConfig::default();
    config.scoring.habitat_weight = 0.4;
    config.scoring.geographic_weight = 0.2;
    let engine = ValidationEngine::new(kb, &config).unwrap();
    let result = engine.validate_one(
        &make_detection("Great Snipe", "2025-05-14 20:00", 0.85),
        &make_context(Habitat::Wetland),
    );
    // 0.4*0.9 + 0.2*1 + 0.2*0.5 + 0.2*0.85
    assert!((result.overall_score - 0.83).abs() < 1e-9);
}

// ─── Geographic signal ───────────────────────────────────────────────────

#[test]
fn evaluator_from_config_needs_services() {
    let evaluator = geographic_from_config(&PravenConfig::default()).unwrap();
    assert!(!evaluator.is_configured());

    let engine = make_engine().with_geographic(Arc::new(evaluator));
    let result = engine.validate_one(
        &make_detection("Great Snipe", "2025-05-14 20:00", 0.85),
        &make_context(Habitat::Wetland),
    );
    assert!(result.geographic.is_none());
    assert!(engine.degradation().is_empty());
}

#[test]
fn recent_observations_raise_the_score() {
    let service = MockRecent::new(Ok(RecentOccurrence {
        expected: true,
        frequency: Some(0.5),
        recent_count: 3,
    }));
    let engine = make_engine().with_geographic(make_geographic(service));
    let result = engine.validate_one(
        &make_detection("Great Snipe", "2025-05-14 20:00", 0.85),
        &make_context(Habitat::Wetland),
    );
    assert_eq!(result.status, ValidationStatus::Accept);
    assert!(result.geographic_valid);
    let metadata = result.geographic.unwrap();
    assert!((metadata.occurrence_confidence - 0.85).abs() < 1e-9);
    // 0.27 + 0.2 + 0.3*0.85 + 0.17
    assert!((result.overall_score - 0.895).abs() < 1e-9);
}

#[test]
fn absent_from_recent_observations_is_only_a_note() {
    let service = MockRecent::new(Ok(RecentOccurrence {
        expected: false,
        frequency: None,
        recent_count: 0,
    }));
    let engine = make_engine().with_geographic(make_geographic(service));
    let result = engine.validate_one(
        &make_detection("Great Snipe", "2025-05-14 20:00", 0.85),
        &make_context(Habitat::Wetland),
    );
    assert_eq!(result.status, ValidationStatus::Accept);
    assert!(!result.geographic_valid);
    assert_eq!(
        result.review_notes,
        vec!["Recent observations: Great Snipe not observed within 50 km in the last 30 days (63.341, 10.215)"
            .to_string()]
    );
}

#[test]
fn failing_service_degrades_to_neutral() {
    let service = MockRecent::new(Err(ServiceError::Transport {
        service: "mock_recent".to_string(),
        reason: "connection refused".to_string(),
    }));
    let engine = make_engine().with_geographic(make_geographic(service));
    let result = engine.validate_one(
        &make_detection("Great Snipe", "2025-05-14 20:00", 0.85),
        &make_context(Habitat::Wetland),
    );
    assert_eq!(result.status, ValidationStatus::Accept);
    assert!(result.geographic_valid);
    assert!(result.geographic.is_none());
    assert!((result.overall_score - 0.79).abs() < 1e-9);
    assert_eq!(result.review_notes.len(), 1);
    assert!(result.review_notes[0].starts_with("Recent observations unavailable:"));
    assert_eq!(engine.degradation().count("geographic"), 1);
}

struct FlakyRecent {
    failing: AtomicBool,
}

impl IOccurrenceService for FlakyRecent {
    fn name(&self) -> &str {
        "flaky_recent"
    }

    fn check(
        &self,
        _species: &str,
        _lat: f64,
        _lon: f64,
        _date: NaiveDate,
        _radius_km: f64,
    ) -> Result<RecentOccurrence, ServiceError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ServiceError::NoData {
                service: "flaky_recent".to_string(),
            })
        } else {
            Ok(RecentOccurrence {
                expected: true,
                frequency: Some(0.5),
                recent_count: 2,
            })
        }
    }
}

#[test]
fn outage_is_tracked_once_and_recovers() {
    let service = Arc::new(FlakyRecent {
        failing: AtomicBool::new(true),
    });
    let cache = Arc::new(ResponseCache::new(Duration::from_secs(3600), 100));
    let geographic = Arc::new(
        GeographicEvaluator::new(GeographicConfig::default(), cache)
            .with_recent_service(service.clone()),
    );
    let engine = make_engine().with_geographic(geographic);
    let ctx = make_context(Habitat::Wetland);

    for species in ["Great Snipe", "Common Snipe", "Water Rail", "Great Snipe"] {
        engine.validate_one(&make_detection(species, "2025-05-14 20:00", 0.85), &ctx);
    }
    let tracker = engine.degradation();
    assert_eq!(tracker.count("geographic"), 1);
    assert_eq!(tracker.occurrences("geographic"), 4);
    assert!(tracker.is_active("geographic"));

    service.failing.store(false, Ordering::SeqCst);
    let result = engine.validate_one(&make_detection("Corn Crake", "2025-05-14 20:00", 0.85), &ctx);
    assert!(result.geographic.is_some());
    assert!(!tracker.is_active("geographic"));
    assert!(tracker.active_degradations().is_empty());
    assert_eq!(tracker.count("geographic"), 1);
}

#[test]
fn repeated_evaluation_is_identical_and_cached() {
    let service = MockRecent::new(Ok(RecentOccurrence {
        expected: true,
        frequency: Some(1.0),
        recent_count: 5,
    }));
    let engine = make_engine().with_geographic(make_geographic(service.clone()));
    let detection = make_detection("Great Snipe", "2025-05-14 20:00", 0.85);
    let ctx = make_context(Habitat::Wetland);

    let first = engine.validate_one(&detection, &ctx);
    let second = engine.validate_one(&detection, &ctx);
    assert_eq!(first, second);
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
}

// ─── Weather ─────────────────────────────────────────────────────────────

#[test]
fn harsh_weather_adds_a_note_but_never_rejects() {
    let engine = make_engine();
    let ctx = make_context(Habitat::Wetland).with_weather(WeatherConditions {
        rain: 1.0,
        fog: 1.0,
        temperature_c: Some(-5.0),
        wind_speed: Some(20.0),
        cloud_cover: 1.0,
    });
    let result = engine.validate_one(
        &make_detection("Great Snipe", "2025-05-14 20:00", 0.85),
        &ctx,
    );
    assert_eq!(result.status, ValidationStatus::Accept);
    assert!((result.weather_score.unwrap() - 0.1).abs() < 1e-9);
    assert_eq!(
        result.review_notes,
        vec!["Low weather activity score: 0.10 (species less likely active in these conditions)"
            .to_string()]
    );
}

struct FixedModel(f64);

impl IActivityModel for FixedModel {
    fn is_trained(&self) -> bool {
        true
    }

    fn predict_activity_score(&self, _species: &str, _weather: &WeatherConditions) -> f64 {
        self.0
    }
}

#[test]
fn trained_activity_model_replaces_heuristic() {
    let engine = make_engine().with_activity_model(Arc::new(FixedModel(0.42)));
    let ctx = make_context(Habitat::Wetland).with_weather(WeatherConditions::default());
    let result = engine.validate_one(
        &make_detection("Great Snipe", "2025-05-14 20:00", 0.85),
        &ctx,
    );
    assert_eq!(result.weather_score, Some(0.42));
    assert!(result.review_notes.is_empty());
}

#[test]
fn no_weather_means_no_weather_score() {
    let engine = make_engine();
    let result = engine.validate_one(
        &make_detection("Great Snipe", "2025-05-14 20:00", 0.85),
        &make_context(Habitat::Wetland),
    );
    assert_eq!(result.weather_score, None);
}

// ─── Thresholds ──────────────────────────────────────────────────────────

#[test]
fn accept_requires_detector_confidence() {
    let engine = make_engine();
    // overall 0.3*0.9 + 0.2 + 0.15 + 0.2*0.65 = 0.75, confidence below 0.7
    let result = engine.validate_one(
        &make_detection("Great Snipe", "2025-05-14 20:00", 0.65),
        &make_context(Habitat::Wetland),
    );
    assert_eq!(result.status, ValidationStatus::Review);
    assert!(result.review_notes.is_empty());
}

#[test]
fn unknown_habitat_is_neutral() {
    let engine = make_engine();
    let result = engine.validate_one(
        &make_detection("Great Snipe", "2025-05-14 20:00", 0.85),
        &make_context(Habitat::Unknown),
    );
    assert!(result.habitat_valid);
    // 0.3*0.5 + 0.2 + 0.15 + 0.17
    assert!((result.overall_score - 0.67).abs() < 1e-9);
    assert_eq!(result.status, ValidationStatus::Review);
}

#[test]
fn pelagic_species_rejected_without_habitat() {
    let engine = make_engine();
    let ctx = ValidationContext::builder(63.341, 10.215, "2025-05-14")
        .build()
        .unwrap();
    let result = engine.validate_one(
        &make_detection("European Storm-Petrel", "2025-05-14 12:00", 0.81),
        &ctx,
    );
    assert_eq!(result.status, ValidationStatus::Reject);
    assert!(!result.habitat_valid);
    assert!(result
        .rejection_reason
        .unwrap()
        .starts_with("Habitat mismatch: European Storm-Petrel is pelagic/oceanic species"));
}

#[test]
fn configured_region_reaches_evaluation() {
    let kb = Arc::new(KnowledgeBase::bundled().unwrap());
    let mut config = PravenConfig::default();
    config.apply_env_overrides(|key| {
        (key == "PRAVEN_EXPECTED_REGION").then(|| "East Asia".to_string())
    });
    let engine = ValidationEngine::new(kb, &config).unwrap();
    let ctx = ValidationContext::builder_from(&config, 63.341, 10.215, "2025-05-14")
        .habitat(Habitat::Wetland)
        .build()
        .unwrap();

    let result = engine.validate_one(
        &make_detection("Mandarin Duck", "2025-05-14 10:00", 0.9),
        &ctx,
    );
    assert_ne!(result.status, ValidationStatus::Reject);
    assert!(result.habitat_valid);
    assert!(result.rejection_reason.is_none());
}
