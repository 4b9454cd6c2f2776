//! Smart review selection and species-level decisions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use praven_core::config::ReviewConfig;
use praven_core::{Detection, ValidationResult, ValidationStatus};
use praven_validation::{
    apply_species_decision, apply_species_decisions, review_by_species, select_for_review,
    select_for_review_with, SpeciesDecision,
};

fn make_result(species: &str, confidence: f64, status: ValidationStatus) -> ValidationResult {
    let ts = NaiveDate::from_ymd_opt(2025, 5, 14)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap();
    let mut result = ValidationResult::review_only(&Detection::new(species, ts, confidence), "");
    result.review_notes.clear();
    result.status = status;
    result.overall_score = 0.6;
    result
}

fn review(species: &str, confidence: f64) -> ValidationResult {
    make_result(species, confidence, ValidationStatus::Review)
}

// ─── Selection ───────────────────────────────────────────────────────────

#[test]
fn picks_best_candidates_per_species() {
    let results = vec![
        review("Great Snipe", 0.40),
        make_result("Great Snipe", 0.95, ValidationStatus::Accept),
        review("Water Rail", 0.70),
        review("Great Snipe", 0.80),
        review("Great Snipe", 0.60),
        review("Great Snipe", 0.90),
        make_result("Great Tit", 0.90, ValidationStatus::Reject),
    ];

    let (candidates, summary) = select_for_review(&results, 2);

    let picked: Vec<(String, usize)> = candidates
        .iter()
        .map(|c| (c.result.species.clone(), c.index))
        .collect();
    assert_eq!(
        picked,
        vec![
            ("Great Snipe".to_string(), 5),
            ("Great Snipe".to_string(), 3),
            ("Water Rail".to_string(), 2),
        ]
    );

    assert_eq!(summary.total_detections, 7);
    assert_eq!(summary.auto_validated, 2);
    assert_eq!(summary.review_count, 5);
    assert_eq!(summary.review_required, 3);
    assert_eq!(summary.species_to_review, 2);
    assert!((summary.reduction_percent - 40.0).abs() < 1e-9);
}

#[test]
fn quality_rewards_clean_and_valid_records() {
    let clean = review("Great Snipe", 0.5);
    let mut noted = review("Great Snipe", 0.5);
    noted.review_notes.push("Low weather activity score: 0.10".to_string());
    let mut off_hours = review("Great Snipe", 0.5);
    off_hours.temporal_valid = false;

    let (candidates, _) = select_for_review(&[off_hours, noted, clean], 3);
    let scores: Vec<(usize, f64)> = candidates.iter().map(|c| (c.index, c.quality_score)).collect();

    assert_eq!(scores[0].0, 2);
    assert!((scores[0].1 - 0.7).abs() < 1e-9);
    assert_eq!(scores[1].0, 0);
    assert!((scores[1].1 - 0.65).abs() < 1e-9);
    assert_eq!(scores[2].0, 1);
    assert!((scores[2].1 - 0.6).abs() < 1e-9);
}

#[test]
fn invalid_confidence_never_outranks_valid_records() {
    let results = vec![
        review("Great Snipe", 0.6),
        review("Great Snipe", 0.65),
        review("Great Snipe", f64::NAN),
        review("Great Snipe", 0.5),
        review("Great Snipe", 1.5),
    ];

    let (top, _) = select_for_review(&results, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].index, 1);

    let (all, _) = select_for_review(&results, 5);
    let indices: Vec<usize> = all.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![1, 0, 3, 2, 4]);
    assert!((all[3].quality_score - 0.2).abs() < 1e-9);
    assert!((all[4].quality_score - 0.2).abs() < 1e-9);
}

#[test]
fn limit_comes_from_review_config() {
    let results: Vec<_> = (0..6).map(|i| review("Common Snipe", 0.1 * i as f64)).collect();

    let (candidates, summary) = select_for_review_with(&results, &ReviewConfig::default());
    assert_eq!(candidates.len(), ReviewConfig::default().per_species_limit.min(6));

    let config = ReviewConfig {
        per_species_limit: 2,
    };
    let (candidates, summary_two) = select_for_review_with(&results, &config);
    let indices: Vec<usize> = candidates.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![5, 4]);
    assert_eq!(summary_two.review_required, 2);
    assert_eq!(summary.review_count, summary_two.review_count);
}

#[test]
fn ties_keep_input_order() {
    let results: Vec<_> = (0..5).map(|_| review("Common Snipe", 0.5)).collect();
    let (candidates, _) = select_for_review(&results, 3);
    let indices: Vec<usize> = candidates.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn nothing_to_review() {
    let results = vec![
        make_result("Great Snipe", 0.9, ValidationStatus::Accept),
        make_result("Great Tit", 0.9, ValidationStatus::Reject),
    ];
    let (candidates, summary) = select_for_review(&results, 3);
    assert!(candidates.is_empty());
    assert_eq!(summary.review_count, 0);
    assert_eq!(summary.reduction_percent, 0.0);
}

#[test]
fn groups_candidates_by_species() {
    let results = vec![
        review("Water Rail", 0.5),
        review("Great Snipe", 0.9),
        review("Water Rail", 0.8),
    ];
    let (candidates, _) = select_for_review(&results, 3);
    let grouped = review_by_species(&candidates);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].0, "Water Rail");
    assert_eq!(grouped[0].1.len(), 2);
    assert_eq!(grouped[1].0, "Great Snipe");
}

// ─── Decisions ───────────────────────────────────────────────────────────

#[test]
fn decision_flips_only_review_rows_of_that_species() {
    let results = vec![
        review("Great Snipe", 0.4),
        make_result("Great Snipe", 0.9, ValidationStatus::Reject),
        review("Water Rail", 0.7),
        review("Great Snipe", 0.6),
    ];

    let (updated, changed) =
        apply_species_decision(&results, "Great Snipe", SpeciesDecision::Accept);
    assert_eq!(changed, 2);
    assert_eq!(updated[0].status, ValidationStatus::Accept);
    assert_eq!(
        updated[0].review_decision.as_deref(),
        Some("Accepted after manual review")
    );
    assert_eq!(updated[1], results[1]);
    assert_eq!(updated[2], results[2]);
    assert_eq!(updated[3].status, ValidationStatus::Accept);

    let (rejected, changed) =
        apply_species_decision(&results, "Water Rail", SpeciesDecision::Reject);
    assert_eq!(changed, 1);
    assert_eq!(rejected[2].status, ValidationStatus::Reject);
    assert_eq!(
        rejected[2].review_decision.as_deref(),
        Some("Rejected after manual review")
    );
}

#[test]
fn decision_for_absent_species_changes_nothing() {
    let results = vec![review("Great Snipe", 0.4)];
    let (updated, changed) = apply_species_decision(&results, "Corn Crake", SpeciesDecision::Reject);
    assert_eq!(changed, 0);
    assert_eq!(updated, results);
}

#[test]
fn decisions_apply_per_species() {
    let results = vec![
        review("Great Snipe", 0.4),
        review("Water Rail", 0.7),
        review("Corn Crake", 0.7),
    ];
    let mut decisions: BTreeMap<String, SpeciesDecision> = BTreeMap::new();
    decisions.insert("Great Snipe".to_string(), "accept".parse().unwrap());
    decisions.insert("Water Rail".to_string(), SpeciesDecision::Reject);

    let (updated, changed) = apply_species_decisions(&results, &decisions);
    assert_eq!(changed, 2);
    assert_eq!(updated[0].status, ValidationStatus::Accept);
    assert_eq!(updated[1].status, ValidationStatus::Reject);
    assert_eq!(updated[2].status, ValidationStatus::Review);
}
