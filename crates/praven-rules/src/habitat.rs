//! Habitat suitability and native-range rules.

use praven_core::constants::NEUTRAL_SCORE;
use praven_core::models::Habitat;
use praven_core::EvaluatorResult;
use praven_knowledge::KnowledgeBase;
use tracing::debug;

/// Score `habitat` for `species` against `min_threshold`.
///
/// Unknown species and profiles without habitat data are neutral (valid,
/// 0.5). A strict pelagic species fails in any non-oceanic habitat, unknown
/// included, whatever the threshold. Otherwise an unknown habitat is neutral.
pub fn evaluate_habitat(
    kb: &KnowledgeBase,
    species: &str,
    habitat: Habitat,
    min_threshold: f64,
) -> EvaluatorResult {
    let resolved = kb.resolve(species);
    let profile = match resolved.profile {
        Some(p) if !p.habitat_preferences.is_empty() => p,
        _ => {
            debug!(species, habitat = %habitat, "habitat check neutral");
            return EvaluatorResult::pass(NEUTRAL_SCORE, habitat.as_str());
        }
    };

    let score = profile.preference(habitat).unwrap_or(0.0);
    let suffix = resolved.rule_suffix();

    if habitat != Habitat::Oceanic && profile.is_oceanic_specialist() {
        return EvaluatorResult::fail(
            format!(
                "Habitat mismatch: {species} is pelagic/oceanic species{suffix}, \
                 detected in {habitat} habitat (score={score:.2})"
            ),
            score,
            habitat.as_str(),
        );
    }

    if habitat == Habitat::Unknown {
        debug!(species, "habitat unknown, check neutral");
        return EvaluatorResult::pass(NEUTRAL_SCORE, habitat.as_str());
    }

    if score < min_threshold {
        let reason = match profile.best_habitat() {
            Some((best, best_score)) => format!(
                "Habitat mismatch: {species} prefers {best} (score={best_score:.2}){suffix}, \
                 detected in {habitat} (score={score:.2})"
            ),
            None => format!("Habitat mismatch: {species} detected in {habitat} (score={score:.2})"),
        };
        return EvaluatorResult::fail(reason, score, habitat.as_str());
    }

    EvaluatorResult::pass(score, habitat.as_str())
}

/// Whether `species` is native to `expected_region`. A species without a
/// declared native region is never rejected.
pub fn check_native_region(
    kb: &KnowledgeBase,
    species: &str,
    expected_region: &str,
) -> (bool, Option<String>) {
    let native = kb
        .resolve(species)
        .profile
        .and_then(|p| p.native_region.as_deref());
    match native {
        Some(native) if native != expected_region => (
            false,
            Some(format!(
                "Non-native species: {species} is native to {native}, \
                 not {expected_region} (likely escaped bird)"
            )),
        ),
        _ => (true, None),
    }
}

/// Habitats scoring at least `threshold`, in habitat order.
pub fn preferred_habitats(kb: &KnowledgeBase, species: &str, threshold: f64) -> Vec<Habitat> {
    kb.resolve(species)
        .profile
        .map(|p| {
            p.habitat_preferences
                .iter()
                .filter(|(_, score)| **score >= threshold)
                .map(|(habitat, _)| *habitat)
                .collect()
        })
        .unwrap_or_default()
}
