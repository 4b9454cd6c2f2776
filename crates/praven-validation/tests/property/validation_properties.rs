//! Property tests for the decision engine and review selector.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use chrono::NaiveDate;
use praven_core::traits::IValidator;
use praven_core::{
    Detection, Habitat, PravenConfig, ValidationContext, ValidationResult, ValidationStatus,
};
use praven_knowledge::KnowledgeBase;
use praven_validation::{apply_species_decision, select_for_review, SpeciesDecision, ValidationEngine};
use proptest::prelude::*;

const SPECIES: &[&str] = &[
    "Great Snipe",
    "Great Tit",
    "Tawny Owl",
    "Mallard",
    "European Storm-Petrel",
    "Lesser Spotted Woodpecker",
    "Mandarin Duck",
    "Xyzzy Bird",
];

const HABITATS: &[Habitat] = &[
    Habitat::Forest,
    Habitat::Wetland,
    Habitat::Grassland,
    Habitat::Urban,
    Habitat::Oceanic,
    Habitat::Unknown,
];

fn engine() -> &'static ValidationEngine {
    static ENGINE: OnceLock<ValidationEngine> = OnceLock::new();
    ENGINE.get_or_init(|| {
        let kb = Arc::new(KnowledgeBase::bundled().unwrap());
        ValidationEngine::new(kb, &PravenConfig::default()).unwrap()
    })
}

fn detection(species: &str, hour: u32, minute: u32, confidence: f64) -> Detection {
    let ts = NaiveDate::from_ymd_opt(2025, 5, 14)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap();
    Detection::new(species, ts, confidence)
}

fn context(habitat: Habitat) -> ValidationContext {
    ValidationContext::builder(63.341, 10.215, "2025-05-14")
        .habitat(habitat)
        .build()
        .unwrap()
}

fn arb_status() -> impl Strategy<Value = ValidationStatus> {
    prop_oneof![
        Just(ValidationStatus::Accept),
        Just(ValidationStatus::Reject),
        Just(ValidationStatus::Review),
    ]
}

fn arb_results() -> impl Strategy<Value = Vec<ValidationResult>> {
    prop::collection::vec((0..SPECIES.len(), 0.0f64..=1.0, arb_status()), 0..40).prop_map(
        |rows| {
            rows.into_iter()
                .map(|(s, confidence, status)| {
                    let mut result =
                        ValidationResult::review_only(&detection(SPECIES[s], 12, 0, confidence), "");
                    result.review_notes.clear();
                    result.status = status;
                    result
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn overall_score_is_bounded(
        s in 0..SPECIES.len(),
        h in 0..HABITATS.len(),
        hour in 0u32..24,
        minute in 0u32..60,
        confidence in 0.0f64..=1.0,
    ) {
        let result = engine().validate_one(&detection(SPECIES[s], hour, minute, confidence), &context(HABITATS[h]));
        prop_assert!((0.0..=1.0).contains(&result.overall_score));
        prop_assert_eq!(result.status == ValidationStatus::Reject, result.rejection_reason.is_some());
    }

    #[test]
    fn unknown_species_never_rejected(
        h in 0..HABITATS.len(),
        hour in 0u32..24,
        confidence in 0.0f64..=1.0,
    ) {
        let result = engine().validate_one(&detection("Xyzzy Bird", hour, 0, confidence), &context(HABITATS[h]));
        prop_assert_ne!(result.status, ValidationStatus::Reject);
    }

    #[test]
    fn accept_implies_thresholds_met(
        s in 0..SPECIES.len(),
        h in 0..HABITATS.len(),
        hour in 0u32..24,
        confidence in 0.0f64..=1.0,
    ) {
        let result = engine().validate_one(&detection(SPECIES[s], hour, 0, confidence), &context(HABITATS[h]));
        if result.status == ValidationStatus::Accept {
            prop_assert!(result.overall_score >= 0.7);
            prop_assert!(result.confidence >= 0.7);
            prop_assert!(result.rejection_reason.is_none());
        }
    }

    #[test]
    fn selection_respects_limit_and_status(results in arb_results(), limit in 1usize..5) {
        let (candidates, summary) = select_for_review(&results, limit);
        let mut per_species: BTreeMap<&str, usize> = BTreeMap::new();
        for candidate in &candidates {
            prop_assert_eq!(results[candidate.index].status, ValidationStatus::Review);
            *per_species.entry(candidate.result.species.as_str()).or_insert(0) += 1;
        }
        prop_assert!(per_species.values().all(|n| *n <= limit));
        prop_assert_eq!(summary.review_required, candidates.len());
        prop_assert_eq!(summary.auto_validated + summary.review_count, results.len());
    }

    #[test]
    fn decision_touches_only_review_rows_of_species(results in arb_results(), s in 0..SPECIES.len()) {
        let species = SPECIES[s];
        let expected_changes = results
            .iter()
            .filter(|r| r.species == species && r.status == ValidationStatus::Review)
            .count();
        let (updated, changed) = apply_species_decision(&results, species, SpeciesDecision::Reject);
        prop_assert_eq!(changed, expected_changes);
        for (before, after) in results.iter().zip(&updated) {
            if before.species == species && before.status == ValidationStatus::Review {
                prop_assert_eq!(after.status, ValidationStatus::Reject);
            } else {
                prop_assert_eq!(before, after);
            }
        }
    }
}
