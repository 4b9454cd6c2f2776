//! ValidationEngine: runs the habitat, native-range, temporal, geographic and
//! weather signals for one detection and folds them into a terminal status.
//!
//! Hard failures (habitat, native range, diel period) reject. Everything else
//! (seasonality, occurrence evidence, weather) only adds review notes and can
//! block automatic acceptance, never cause a rejection.

use std::sync::Arc;

use praven_cache::ResponseCache;
use praven_core::config::{PravenConfig, ScoringConfig};
use praven_core::constants::{RECENT_SERVICE_NAME, RECORDS_SERVICE_NAME};
use praven_core::errors::PravenResult;
use praven_core::models::GeographicSignal;
use praven_core::traits::{IActivityModel, IValidator};
use praven_core::{Detection, ValidationContext, ValidationResult, ValidationStatus};
use praven_geographic::{GeographicAssessment, GeographicEvaluator};
use praven_knowledge::KnowledgeBase;
use praven_observability::{validation_span, DegradationTracker};
use praven_rules::{
    check_native_region, evaluate_detection_time, evaluate_habitat, WeatherActivityModel,
};
use tracing::{debug, warn};

const SEASONAL_BLOCK_NOTE: &str = "Seasonal warning prevents automatic acceptance";
const GEOGRAPHIC_COMPONENT: &str = "geographic";

/// The multi-signal decision engine.
///
/// Cheap to share: the knowledge base, geographic evaluator and degradation
/// tracker sit behind `Arc`, so one engine serves every batch worker.
pub struct ValidationEngine {
    kb: Arc<KnowledgeBase>,
    scoring: ScoringConfig,
    weather_model: WeatherActivityModel,
    geographic: Option<Arc<GeographicEvaluator>>,
    degradation: Arc<DegradationTracker>,
}

impl ValidationEngine {
    /// Build an engine over `kb`. Fails if the config does not validate.
    pub fn new(kb: Arc<KnowledgeBase>, config: &PravenConfig) -> PravenResult<Self> {
        config.validate()?;
        Ok(Self {
            kb,
            scoring: config.scoring.clone(),
            weather_model: WeatherActivityModel::new(&config.weather),
            geographic: None,
            degradation: Arc::new(DegradationTracker::new()),
        })
    }

    /// Attach an occurrence evaluator. Without one the geographic signal is
    /// unavailable and scores as neutral.
    pub fn with_geographic(mut self, geographic: Arc<GeographicEvaluator>) -> Self {
        self.geographic = Some(geographic);
        self
    }

    /// Plug a trained weather-activity model in front of the heuristic.
    pub fn with_activity_model(mut self, model: Arc<dyn IActivityModel>) -> Self {
        self.weather_model = self.weather_model.with_model(model);
        self
    }

    pub fn with_degradation_tracker(mut self, tracker: Arc<DegradationTracker>) -> Self {
        self.degradation = tracker;
        self
    }

    pub fn degradation(&self) -> &Arc<DegradationTracker> {
        &self.degradation
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    fn assess_geography(
        &self,
        detection: &Detection,
        ctx: &ValidationContext,
    ) -> GeographicAssessment {
        let Some(geographic) = &self.geographic else {
            return GeographicAssessment::unavailable();
        };
        let assessment = geographic.evaluate(detection, ctx);
        match &assessment.signal {
            GeographicSignal::Assessed { metadata } => {
                self.degradation.mark_recovered(GEOGRAPHIC_COMPONENT);
                for (service, answered) in [
                    (RECENT_SERVICE_NAME, metadata.recent.is_some()),
                    (RECORDS_SERVICE_NAME, metadata.records.is_some()),
                ] {
                    if answered {
                        self.degradation.mark_recovered(service);
                    }
                }
                for component in &metadata.degraded {
                    self.degradation
                        .record(component, "no answer", "remaining occurrence service");
                }
            }
            GeographicSignal::Degraded { reasons } => {
                self.degradation
                    .record(GEOGRAPHIC_COMPONENT, &reasons.join("; "), "neutral confidence");
            }
            GeographicSignal::Unavailable => {}
        }
        assessment
    }

    fn evaluate(&self, detection: &Detection, ctx: &ValidationContext) -> ValidationResult {
        let species = detection.species_common_name.as_str();
        let confidence = detection.detector_confidence;
        let thresholds = &ctx.thresholds;

        let mut rejections: Vec<String> = Vec::new();
        let mut notes: Vec<String> = Vec::new();

        // Habitat, then native range, then time of day.
        let habitat =
            evaluate_habitat(&self.kb, species, ctx.habitat, thresholds.habitat_min_score);
        let mut habitat_valid = habitat.valid;
        if let Some(reason) = &habitat.reason {
            rejections.push(reason.clone());
        }
        let (native, native_reason) =
            check_native_region(&self.kb, species, &thresholds.expected_region);
        if let Some(reason) = native_reason {
            rejections.push(reason);
        }
        habitat_valid &= native;

        let temporal = match evaluate_detection_time(&self.kb, species, detection.timestamp) {
            Ok(t) => t,
            Err(e) => {
                warn!(species, error = %e, "temporal evaluation failed");
                return ValidationResult::review_only(detection, format!("Evaluation failed: {e}"));
            }
        };
        if let Some(reason) = &temporal.reason {
            rejections.push(reason.clone());
        }
        let seasonal_warning = !temporal.warnings.is_empty();
        notes.extend(temporal.warnings.iter().cloned());

        let geographic = self.assess_geography(detection, ctx);
        notes.extend(geographic.notes.iter().cloned());

        let weather_score = ctx
            .weather
            .as_ref()
            .map(|w| self.weather_model.score(species, w));
        if let Some(score) = weather_score {
            if score < thresholds.low_weather_score {
                notes.push(format!(
                    "Low weather activity score: {score:.2} (species less likely active in these conditions)"
                ));
            }
        }

        let geo_confidence = geographic
            .signal
            .confidence()
            .unwrap_or(self.scoring.neutral_geographic_confidence);
        let temporal_score = if temporal.valid { 1.0 } else { 0.0 };
        let overall = (self.scoring.habitat_weight * habitat.score
            + self.scoring.temporal_weight * temporal_score
            + self.scoring.geographic_weight * geo_confidence
            + self.scoring.confidence_weight * confidence)
            .clamp(0.0, 1.0);

        let (status, rejection_reason) = if !rejections.is_empty() {
            (ValidationStatus::Reject, Some(rejections.join("; ")))
        } else {
            let accept_worthy = overall >= thresholds.accept_score_threshold
                && confidence >= thresholds.accept_confidence_threshold;
            if accept_worthy && !seasonal_warning {
                (ValidationStatus::Accept, None)
            } else {
                if accept_worthy {
                    notes.push(SEASONAL_BLOCK_NOTE.to_string());
                } else if overall < thresholds.review_score_floor
                    || confidence < thresholds.min_confidence
                {
                    notes.push(format!(
                        "Low overall score: {overall:.2} or low detector confidence: {confidence:.2}"
                    ));
                }
                (ValidationStatus::Review, None)
            }
        };

        let resolved = self.kb.resolve(species);
        debug!(
            species,
            status = %status,
            overall,
            source = %resolved.source,
            "detection evaluated"
        );

        ValidationResult {
            species: species.to_string(),
            scientific_name: detection.species_scientific_name.clone(),
            timestamp: detection.timestamp,
            confidence,
            status,
            geographic_valid: geographic.signal.is_valid(),
            temporal_valid: temporal.valid,
            habitat_valid,
            temporal_period: temporal.detail,
            overall_score: overall,
            rejection_reason,
            review_notes: notes,
            weather_score,
            geographic: geographic.signal.metadata().cloned(),
            profile_source: resolved.source,
            review_decision: None,
        }
    }
}

impl IValidator for ValidationEngine {
    fn validate_one(&self, detection: &Detection, ctx: &ValidationContext) -> ValidationResult {
        let span = validation_span!(detection.species_common_name, detection.timestamp);
        let _guard = span.enter();

        if !detection.has_valid_confidence() {
            warn!(
                species = %detection.species_common_name,
                confidence = detection.detector_confidence,
                "invalid detector confidence"
            );
            return ValidationResult::review_only(
                detection,
                format!(
                    "Invalid detector confidence: {} (expected a value in [0, 1])",
                    detection.detector_confidence
                ),
            );
        }
        self.evaluate(detection, ctx)
    }
}

/// Occurrence evaluator with the API cache described by `config`. Services
/// are attached by the caller.
pub fn geographic_from_config(config: &PravenConfig) -> PravenResult<GeographicEvaluator> {
    let cache = ResponseCache::from_config(&config.cache)?;
    Ok(GeographicEvaluator::new(
        config.geographic.clone(),
        Arc::new(cache),
    ))
}
