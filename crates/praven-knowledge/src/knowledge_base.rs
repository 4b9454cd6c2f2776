//! Loading, validation and lookup of the knowledge tables.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use praven_core::errors::KnowledgeError;
use praven_core::models::{ProfileSource, ResolvedProfile, SpeciesProfile};
use serde::Serialize;
use tracing::{debug, info};

use crate::bundled;
use crate::inference;
use crate::tables::{Species, SpeciesDocument, TaxonomicRule, TaxonomyDocument};

/// Immutable species knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    /// Curated species keyed by normalized common name.
    species: HashMap<String, Species>,
    /// Family rules in match order.
    families: Vec<TaxonomicRule>,
    /// Order rules in match order.
    orders: Vec<TaxonomicRule>,
    /// Exceptions keyed by normalized common name.
    exceptions: HashMap<String, Species>,
}

/// Table sizes, for logging and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub curated_species: usize,
    pub families: usize,
    pub orders: usize,
    pub exceptions: usize,
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl KnowledgeBase {
    /// The tables compiled into the binary.
    pub fn bundled() -> Result<Self, KnowledgeError> {
        Self::from_toml(bundled::SPECIES_TOML, bundled::TAXONOMY_TOML)
    }

    /// Load replacement tables from disk.
    pub fn from_files(species_path: &Path, taxonomy_path: &Path) -> Result<Self, KnowledgeError> {
        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|e| KnowledgeError::ReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        };
        Self::from_toml(&read(species_path)?, &read(taxonomy_path)?)
    }

    /// Parse and validate both table documents.
    pub fn from_toml(species_toml: &str, taxonomy_toml: &str) -> Result<Self, KnowledgeError> {
        let species_doc: SpeciesDocument =
            toml::from_str(species_toml).map_err(|e| KnowledgeError::ParseFailed {
                table: "species".to_string(),
                reason: e.to_string(),
            })?;
        let taxonomy_doc: TaxonomyDocument =
            toml::from_str(taxonomy_toml).map_err(|e| KnowledgeError::ParseFailed {
                table: "taxonomy".to_string(),
                reason: e.to_string(),
            })?;

        let species = index_species("species", species_doc.species.into_iter().map(Species::from))?;
        let exceptions = index_species(
            "exception",
            taxonomy_doc.exception.into_iter().map(Species::from),
        )?;
        let families = check_rules("family", taxonomy_doc.family.into_iter().map(TaxonomicRule::from))?;
        let orders = check_rules("order", taxonomy_doc.order.into_iter().map(TaxonomicRule::from))?;

        let kb = Self {
            species,
            families,
            orders,
            exceptions,
        };
        let coverage = kb.coverage();
        info!(
            curated = coverage.curated_species,
            families = coverage.families,
            orders = coverage.orders,
            exceptions = coverage.exceptions,
            "knowledge base loaded"
        );
        Ok(kb)
    }

    /// Curated entry for a species, by common name (case-insensitive).
    pub fn curated(&self, common_name: &str) -> Option<&Species> {
        self.species.get(&normalize_name(common_name))
    }

    /// Exception entry for a species, by common name (case-insensitive).
    pub fn exception(&self, common_name: &str) -> Option<&Species> {
        self.exceptions.get(&normalize_name(common_name))
    }

    pub fn families(&self) -> &[TaxonomicRule] {
        &self.families
    }

    pub fn orders(&self) -> &[TaxonomicRule] {
        &self.orders
    }

    pub fn family_rule(&self, family: &str) -> Option<&TaxonomicRule> {
        self.families.iter().find(|r| r.name == family)
    }

    pub fn order_rule(&self, order: &str) -> Option<&TaxonomicRule> {
        self.orders.iter().find(|r| r.name == order)
    }

    /// Resolve the profile used by every evaluator:
    /// exception → curated → family → order → unknown.
    pub fn resolve(&self, common_name: &str) -> ResolvedProfile<'_> {
        let resolved = if let Some(e) = self.exception(common_name) {
            known(ProfileSource::Exception, &e.profile)
        } else if let Some(s) = self.curated(common_name) {
            known(ProfileSource::Curated, &s.profile)
        } else if let Some(rule) = inference::match_rule(&self.families, common_name) {
            known(ProfileSource::Family(rule.name.clone()), &rule.profile)
        } else if let Some(rule) = inference::match_rule(&self.orders, common_name) {
            known(ProfileSource::Order(rule.name.clone()), &rule.profile)
        } else {
            ResolvedProfile::unknown()
        };
        debug!(species = common_name, source = %resolved.source, "profile resolved");
        resolved
    }

    pub fn coverage(&self) -> Coverage {
        Coverage {
            curated_species: self.species.len(),
            families: self.families.len(),
            orders: self.orders.len(),
            exceptions: self.exceptions.len(),
        }
    }
}

fn known(source: ProfileSource, profile: &SpeciesProfile) -> ResolvedProfile<'_> {
    ResolvedProfile {
        source,
        profile: Some(profile),
    }
}

fn index_species(
    table: &str,
    entries: impl Iterator<Item = Species>,
) -> Result<HashMap<String, Species>, KnowledgeError> {
    let mut index = HashMap::new();
    for species in entries {
        check_profile(&species.common_name, &species.profile)?;
        let key = normalize_name(&species.common_name);
        if index.contains_key(&key) {
            return Err(KnowledgeError::DuplicateEntry {
                table: table.to_string(),
                name: species.common_name,
            });
        }
        index.insert(key, species);
    }
    Ok(index)
}

fn check_rules(
    table: &str,
    rules: impl Iterator<Item = TaxonomicRule>,
) -> Result<Vec<TaxonomicRule>, KnowledgeError> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for rule in rules {
        check_profile(&rule.name, &rule.profile)?;
        if rule.patterns.is_empty() || rule.patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(KnowledgeError::EmptyPatterns { rule: rule.name });
        }
        if !seen.insert(rule.name.clone()) {
            return Err(KnowledgeError::DuplicateEntry {
                table: table.to_string(),
                name: rule.name,
            });
        }
        out.push(rule);
    }
    Ok(out)
}

fn check_profile(entry: &str, profile: &SpeciesProfile) -> Result<(), KnowledgeError> {
    for (habitat, score) in &profile.habitat_preferences {
        if !(0.0..=1.0).contains(score) {
            return Err(KnowledgeError::ScoreOutOfRange {
                entry: entry.to_string(),
                habitat: habitat.to_string(),
                score: *score,
            });
        }
    }
    if let Some(month) = profile.active_months.iter().find(|m| !(1..=12).contains(*m)) {
        return Err(KnowledgeError::MonthOutOfRange {
            entry: entry.to_string(),
            month: *month,
        });
    }
    Ok(())
}
