//! On-disk shape of the knowledge tables and their in-memory form.
//!
//! Tables are TOML arrays of tables (`[[species]]`, `[[family]]`, `[[order]]`,
//! `[[exception]]`) so that rule order is simply document order.

use std::collections::BTreeSet;

use praven_core::models::{ActivityPattern, HabitatPreferences, MigrationStatus, SpeciesProfile};
use serde::Deserialize;

/// Every table entry carries the same profile fields under the same keys.
macro_rules! profile_from_entry {
    ($e:expr) => {
        SpeciesProfile {
            activity: $e.activity,
            habitat_preferences: $e.habitat,
            native_region: $e.native_region,
            active_months: $e.active_months,
            migration: $e.migration,
            notes: $e.notes,
        }
    };
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SpeciesEntry {
    pub common_name: String,
    #[serde(default)]
    pub scientific_name: Option<String>,
    /// Family the exception overrides. Informational only.
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub activity: ActivityPattern,
    #[serde(default)]
    pub habitat: HabitatPreferences,
    #[serde(default)]
    pub native_region: Option<String>,
    #[serde(default)]
    pub active_months: BTreeSet<u32>,
    #[serde(default)]
    pub migration: MigrationStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RuleEntry {
    pub name: String,
    #[serde(default)]
    pub order: Option<String>,
    pub patterns: Vec<String>,
    #[serde(default)]
    pub activity: ActivityPattern,
    #[serde(default)]
    pub habitat: HabitatPreferences,
    #[serde(default)]
    pub native_region: Option<String>,
    #[serde(default)]
    pub active_months: BTreeSet<u32>,
    #[serde(default)]
    pub migration: MigrationStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SpeciesDocument {
    pub species: Vec<SpeciesEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TaxonomyDocument {
    pub family: Vec<RuleEntry>,
    pub order: Vec<RuleEntry>,
    pub exception: Vec<SpeciesEntry>,
}

/// A curated species or a species exception.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub common_name: String,
    pub scientific_name: Option<String>,
    pub family: Option<String>,
    pub profile: SpeciesProfile,
}

impl From<SpeciesEntry> for Species {
    fn from(e: SpeciesEntry) -> Self {
        let profile = profile_from_entry!(e);
        Species {
            common_name: e.common_name,
            scientific_name: e.scientific_name,
            family: e.family,
            profile,
        }
    }
}

/// Family- or order-level rule with the name patterns used to infer membership.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonomicRule {
    pub name: String,
    pub order: Option<String>,
    /// Lowercased substrings, in declaration order.
    pub patterns: Vec<String>,
    pub profile: SpeciesProfile,
}

impl TaxonomicRule {
    /// Whether any pattern occurs in the (already lowercased) name.
    pub fn matches_lowercase(&self, lowercase_name: &str) -> bool {
        self.patterns.iter().any(|p| lowercase_name.contains(p.as_str()))
    }
}

impl From<RuleEntry> for TaxonomicRule {
    fn from(e: RuleEntry) -> Self {
        let patterns = e.patterns.iter().map(|p| p.to_lowercase()).collect();
        let profile = profile_from_entry!(e);
        TaxonomicRule {
            name: e.name,
            order: e.order,
            patterns,
            profile,
        }
    }
}
