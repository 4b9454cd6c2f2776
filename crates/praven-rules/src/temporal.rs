//! Time-of-day and seasonality rules.
//!
//! Diel periods: night [0,6), dawn [6,9), day [9,17), dusk [17,21), night [21,24).
//! Only two combinations are hard failures: a strictly diurnal species at
//! night, and a strictly nocturnal species during the day. Anything with a
//! crepuscular flag passes in every period.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use praven_core::constants::{DAWN_START_HOUR, DAY_START_HOUR, DUSK_START_HOUR, NIGHT_START_HOUR};
use praven_core::errors::RuleError;
use praven_core::models::{ResolvedProfile, SpeciesProfile};
use praven_core::EvaluatorResult;
use praven_knowledge::KnowledgeBase;
use tracing::debug;

/// Named part of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DielPeriod {
    Night,
    Dawn,
    Day,
    Dusk,
}

impl DielPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DielPeriod::Night => "night",
            DielPeriod::Dawn => "dawn",
            DielPeriod::Day => "day",
            DielPeriod::Dusk => "dusk",
        }
    }
}

impl fmt::Display for DielPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Period containing `hour`.
pub fn diel_period(hour: u32) -> Result<DielPeriod, RuleError> {
    match hour {
        h if h < DAWN_START_HOUR => Ok(DielPeriod::Night),
        h if h < DAY_START_HOUR => Ok(DielPeriod::Dawn),
        h if h < DUSK_START_HOUR => Ok(DielPeriod::Day),
        h if h < NIGHT_START_HOUR => Ok(DielPeriod::Dusk),
        h if h < 24 => Ok(DielPeriod::Night),
        hour => Err(RuleError::HourOutOfRange { hour }),
    }
}

/// Evaluate a detection at `hour:00` on `date`.
pub fn evaluate_temporal(
    kb: &KnowledgeBase,
    species: &str,
    hour: u32,
    date: NaiveDate,
) -> Result<EvaluatorResult, RuleError> {
    evaluate(kb, species, hour, 0, date.month())
}

/// Evaluate a detection at its full timestamp; reasons quote `HH:MM`.
pub fn evaluate_detection_time(
    kb: &KnowledgeBase,
    species: &str,
    timestamp: NaiveDateTime,
) -> Result<EvaluatorResult, RuleError> {
    evaluate(
        kb,
        species,
        timestamp.hour(),
        timestamp.minute(),
        timestamp.month(),
    )
}

fn evaluate(
    kb: &KnowledgeBase,
    species: &str,
    hour: u32,
    minute: u32,
    month: u32,
) -> Result<EvaluatorResult, RuleError> {
    let period = diel_period(hour)?;
    let resolved = kb.resolve(species);
    let Some(profile) = resolved.profile else {
        debug!(species, "no profile, temporal check skipped");
        return Ok(EvaluatorResult::pass(1.0, "unknown"));
    };

    let mut result = match diel_violation(species, &resolved, profile, period, hour, minute) {
        Some(reason) => EvaluatorResult::fail(reason, 0.0, period.as_str()),
        None => EvaluatorResult::pass(1.0, period.as_str()),
    };
    if let Some(warning) = seasonal_warning(species, profile, month) {
        result = result.with_warning(warning);
    }
    Ok(result)
}

fn diel_violation(
    species: &str,
    resolved: &ResolvedProfile<'_>,
    profile: &SpeciesProfile,
    period: DielPeriod,
    hour: u32,
    minute: u32,
) -> Option<String> {
    let suffix = resolved.rule_suffix();
    match period {
        DielPeriod::Night if profile.activity.is_diurnal_only() => Some(format!(
            "Temporal impossibility: {species} is strictly diurnal{suffix}, \
             detected at {hour:02}:{minute:02} (night period)"
        )),
        DielPeriod::Day if profile.activity.is_nocturnal_only() => Some(format!(
            "Temporal implausibility: {species} is nocturnal{suffix}, \
             detected at {hour:02}:{minute:02} (day period)"
        )),
        _ => None,
    }
}

/// Advisory note when `month` is outside the profile's active months.
pub fn seasonal_warning(species: &str, profile: &SpeciesProfile, month: u32) -> Option<String> {
    if profile.is_active_in(month) {
        return None;
    }
    let expected: Vec<u32> = profile.active_months.iter().copied().collect();
    Some(format!(
        "Seasonal implausibility: {species} ({}) detected in month {month}, \
         expected in months {expected:?}",
        profile.migration.describe()
    ))
}
