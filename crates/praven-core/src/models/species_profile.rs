//! Biological profile of a species, whether curated or inferred from its family.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Habitat, HabitatPreferences};
use crate::constants::{OCEANIC_OTHER_MAX, OCEANIC_SPECIALIST_MIN};

/// Diel activity flags. Not mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityPattern {
    pub diurnal: bool,
    pub crepuscular: bool,
    pub nocturnal: bool,
}

impl ActivityPattern {
    pub fn is_diurnal_only(&self) -> bool {
        self.diurnal && !self.crepuscular && !self.nocturnal
    }

    pub fn is_nocturnal_only(&self) -> bool {
        self.nocturnal && !self.diurnal && !self.crepuscular
    }
}

/// Seasonal presence in the survey region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    #[default]
    Resident,
    SummerVisitor,
    WinterVisitor,
    PassageMigrant,
}

impl MigrationStatus {
    /// Wording used in seasonal warnings.
    pub fn describe(&self) -> &'static str {
        match self {
            MigrationStatus::Resident => "seasonal species",
            MigrationStatus::SummerVisitor => "summer visitor",
            MigrationStatus::WinterVisitor => "winter visitor",
            MigrationStatus::PassageMigrant => "passage migrant",
        }
    }
}

/// Activity, habitat and range facts for one species or taxon.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesProfile {
    pub activity: ActivityPattern,
    pub habitat_preferences: HabitatPreferences,
    pub native_region: Option<String>,
    /// Months (1..=12) the species is expected. Empty means all year.
    pub active_months: BTreeSet<u32>,
    pub migration: MigrationStatus,
    pub notes: Option<String>,
}

impl SpeciesProfile {
    pub fn preference(&self, habitat: Habitat) -> Option<f64> {
        self.habitat_preferences.get(&habitat).copied()
    }

    /// Strict pelagic species: oceanic ≥ 0.95 and every other habitat < 0.1.
    pub fn is_oceanic_specialist(&self) -> bool {
        let oceanic = self.preference(Habitat::Oceanic).unwrap_or(0.0);
        oceanic >= OCEANIC_SPECIALIST_MIN
            && self
                .habitat_preferences
                .iter()
                .filter(|(h, _)| **h != Habitat::Oceanic)
                .all(|(_, score)| *score < OCEANIC_OTHER_MAX)
    }

    /// Highest-scoring habitat. Ties go to the habitat declared first.
    pub fn best_habitat(&self) -> Option<(Habitat, f64)> {
        let mut best: Option<(Habitat, f64)> = None;
        for (habitat, score) in &self.habitat_preferences {
            match best {
                Some((_, s)) if *score <= s => {}
                _ => best = Some((*habitat, *score)),
            }
        }
        best
    }

    pub fn is_active_in(&self, month: u32) -> bool {
        self.active_months.is_empty() || self.active_months.contains(&month)
    }
}

/// Which table a resolved profile came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", content = "taxon", rename_all = "snake_case")]
pub enum ProfileSource {
    Exception,
    Curated,
    Family(String),
    Order(String),
    Unknown,
}

impl ProfileSource {
    pub fn is_inferred(&self) -> bool {
        matches!(self, ProfileSource::Family(_) | ProfileSource::Order(_))
    }
}

impl fmt::Display for ProfileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileSource::Exception => f.write_str("exception"),
            ProfileSource::Curated => f.write_str("curated"),
            ProfileSource::Family(name) => write!(f, "family:{name}"),
            ProfileSource::Order(name) => write!(f, "order:{name}"),
            ProfileSource::Unknown => f.write_str("unknown"),
        }
    }
}

/// A profile looked up through the knowledge base, borrowed from its tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProfile<'a> {
    pub source: ProfileSource,
    pub profile: Option<&'a SpeciesProfile>,
}

impl<'a> ResolvedProfile<'a> {
    pub fn unknown() -> Self {
        Self {
            source: ProfileSource::Unknown,
            profile: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.profile.is_some()
    }

    /// Suffix appended to evaluator reasons for inferred profiles.
    pub fn rule_suffix(&self) -> &'static str {
        if self.source.is_inferred() {
            " (family rule)"
        } else {
            ""
        }
    }
}
