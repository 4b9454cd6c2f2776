//! Smart review selection.
//!
//! Reviewers see only the best few REVIEW detections of each species. Their
//! verdict on those is then applied to every REVIEW detection of the species.

use std::collections::BTreeMap;
use std::str::FromStr;

use praven_core::config::ReviewConfig;
use praven_core::errors::ReviewError;
use praven_core::{ValidationResult, ValidationStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

const CLEAN_RECORD_BONUS: f64 = 0.1;
const TEMPORAL_VALID_BONUS: f64 = 0.05;
const HABITAT_VALID_BONUS: f64 = 0.05;

/// A REVIEW detection picked for a human to look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCandidate {
    /// Position in the input slice.
    pub index: usize,
    pub quality_score: f64,
    pub result: ValidationResult,
}

/// What the selector did with a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub total_detections: usize,
    /// ACCEPT + REJECT.
    pub auto_validated: usize,
    pub review_count: usize,
    /// Candidates actually handed to reviewers.
    pub review_required: usize,
    pub species_to_review: usize,
    /// Share of REVIEW detections spared from manual review, in percent.
    pub reduction_percent: f64,
}

/// Quality of a REVIEW record for prioritisation.
///
/// A confidence that is NaN or outside [0, 1] contributes nothing.
pub fn quality_score(result: &ValidationResult) -> f64 {
    let mut score = if (0.0..=1.0).contains(&result.confidence) {
        result.confidence
    } else {
        0.0
    };
    if result.rejection_reason.is_none() && result.review_notes.is_empty() {
        score += CLEAN_RECORD_BONUS;
    }
    if result.temporal_valid {
        score += TEMPORAL_VALID_BONUS;
    }
    if result.habitat_valid {
        score += HABITAT_VALID_BONUS;
    }
    score
}

/// Pick at most `per_species_limit` REVIEW detections per species, best first.
///
/// Species appear in order of first appearance; ties keep input order.
/// Statuses are never changed.
pub fn select_for_review(
    results: &[ValidationResult],
    per_species_limit: usize,
) -> (Vec<ReviewCandidate>, ReviewSummary) {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: BTreeMap<&str, Vec<ReviewCandidate>> = BTreeMap::new();

    for (index, result) in results.iter().enumerate() {
        if !result.is_review() {
            continue;
        }
        let species = result.species.as_str();
        let group = groups.entry(species).or_insert_with(|| {
            order.push(species);
            Vec::new()
        });
        group.push(ReviewCandidate {
            index,
            quality_score: quality_score(result),
            result: result.clone(),
        });
    }

    let review_count: usize = groups.values().map(Vec::len).sum();
    let mut selected = Vec::new();
    for species in &order {
        if let Some(mut group) = groups.remove(species) {
            // sort_by is stable: equal scores keep input order
            group.sort_by(|a, b| b.quality_score.total_cmp(&a.quality_score));
            group.truncate(per_species_limit);
            selected.extend(group);
        }
    }

    let reduction_percent = if review_count > 0 {
        (review_count - selected.len()) as f64 / review_count as f64 * 100.0
    } else {
        0.0
    };
    let summary = ReviewSummary {
        total_detections: results.len(),
        auto_validated: results.len() - review_count,
        review_count,
        review_required: selected.len(),
        species_to_review: order.len(),
        reduction_percent,
    };
    info!(
        review_count,
        review_required = summary.review_required,
        species = summary.species_to_review,
        "review candidates selected"
    );
    (selected, summary)
}

/// [`select_for_review`] with the limit from `[review]` in `praven.toml`.
pub fn select_for_review_with(
    results: &[ValidationResult],
    config: &ReviewConfig,
) -> (Vec<ReviewCandidate>, ReviewSummary) {
    select_for_review(results, config.per_species_limit)
}

/// Group candidates by species, in order of first appearance.
pub fn review_by_species(candidates: &[ReviewCandidate]) -> Vec<(String, Vec<&ReviewCandidate>)> {
    let mut grouped: Vec<(String, Vec<&ReviewCandidate>)> = Vec::new();
    for candidate in candidates {
        match grouped
            .iter_mut()
            .find(|(species, _)| *species == candidate.result.species)
        {
            Some((_, group)) => group.push(candidate),
            None => grouped.push((candidate.result.species.clone(), vec![candidate])),
        }
    }
    grouped
}

/// A reviewer's verdict for a whole species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeciesDecision {
    Accept,
    Reject,
}

impl SpeciesDecision {
    fn status(self) -> ValidationStatus {
        match self {
            SpeciesDecision::Accept => ValidationStatus::Accept,
            SpeciesDecision::Reject => ValidationStatus::Reject,
        }
    }

    fn note(self) -> &'static str {
        match self {
            SpeciesDecision::Accept => "Accepted after manual review",
            SpeciesDecision::Reject => "Rejected after manual review",
        }
    }
}

impl FromStr for SpeciesDecision {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accept" => Ok(SpeciesDecision::Accept),
            "reject" => Ok(SpeciesDecision::Reject),
            _ => Err(ReviewError::UnknownDecision {
                value: s.to_string(),
            }),
        }
    }
}

/// Apply `decision` to every REVIEW record of `species`.
///
/// Returns the updated records and how many changed. ACCEPT and REJECT
/// records, and other species, are left untouched.
pub fn apply_species_decision(
    results: &[ValidationResult],
    species: &str,
    decision: SpeciesDecision,
) -> (Vec<ValidationResult>, usize) {
    let mut changed = 0;
    let updated: Vec<ValidationResult> = results
        .iter()
        .map(|result| {
            if result.is_review() && result.species == species {
                changed += 1;
                let mut result = result.clone();
                result.status = decision.status();
                result.review_decision = Some(decision.note().to_string());
                result
            } else {
                result.clone()
            }
        })
        .collect();
    info!(species, decision = ?decision, changed, "species decision applied");
    (updated, changed)
}

/// Apply one decision per species. Returns the records and the total changed.
pub fn apply_species_decisions(
    results: &[ValidationResult],
    decisions: &BTreeMap<String, SpeciesDecision>,
) -> (Vec<ValidationResult>, usize) {
    let mut current = results.to_vec();
    let mut total = 0;
    for (species, decision) in decisions {
        let (updated, changed) = apply_species_decision(&current, species, *decision);
        current = updated;
        total += changed;
    }
    (current, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decisions_case_insensitively() {
        assert_eq!("Accept".parse::<SpeciesDecision>().unwrap(), SpeciesDecision::Accept);
        assert_eq!(" REJECT ".parse::<SpeciesDecision>().unwrap(), SpeciesDecision::Reject);
        assert!(matches!(
            "maybe".parse::<SpeciesDecision>(),
            Err(ReviewError::UnknownDecision { .. })
        ));
    }
}
