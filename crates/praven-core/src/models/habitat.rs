//! Habitat classes, per-species preference maps, and habitat reports built
//! from map features around a survey location.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::HYBRID_HABITAT_MIN_SHARE;
use crate::errors::ContextError;

/// Closed set of habitat classes understood by the evaluators.
///
/// Declaration order is the tie-break order wherever two habitats score equally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Habitat {
    Wetland,
    Forest,
    Oceanic,
    Grassland,
    Urban,
    Mixed,
    Agricultural,
    Unknown,
}

/// Habitat suitability scores in [0, 1], keyed in declaration order.
pub type HabitatPreferences = BTreeMap<Habitat, f64>;

impl Habitat {
    pub const ALL: [Habitat; 8] = [
        Habitat::Wetland,
        Habitat::Forest,
        Habitat::Oceanic,
        Habitat::Grassland,
        Habitat::Urban,
        Habitat::Mixed,
        Habitat::Agricultural,
        Habitat::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Habitat::Wetland => "wetland",
            Habitat::Forest => "forest",
            Habitat::Oceanic => "oceanic",
            Habitat::Grassland => "grassland",
            Habitat::Urban => "urban",
            Habitat::Mixed => "mixed",
            Habitat::Agricultural => "agricultural",
            Habitat::Unknown => "unknown",
        }
    }

    /// Map a single map-feature tag value to a habitat class.
    pub fn from_feature_value(value: &str) -> Option<Habitat> {
        let habitat = match value {
            "water" | "wetland" | "marsh" | "swamp" | "bog" | "reedbed" | "tidalflat"
            | "saltmarsh" | "reservoir" | "lake" | "pond" | "river" | "stream" => Habitat::Wetland,
            "forest" | "wood" | "tree_row" | "scrub" => Habitat::Forest,
            "grassland" | "meadow" | "heath" | "grass" | "farmland" | "farmyard" => {
                Habitat::Grassland
            }
            "residential" | "commercial" | "industrial" | "retail" | "construction" => {
                Habitat::Urban
            }
            "farm" | "orchard" | "vineyard" | "allotments" | "plant_nursery" => {
                Habitat::Agricultural
            }
            "coastline" | "beach" | "sand" | "bay" => Habitat::Oceanic,
            _ => return None,
        };
        Some(habitat)
    }

    /// Habitat votes cast by one map feature's tags.
    ///
    /// `natural` and `landuse` values are mapped through [`Habitat::from_feature_value`];
    /// the mere presence of a `water`, `wetland` or `waterway` key votes wetland.
    pub fn classify_feature(tags: &BTreeMap<String, String>) -> Vec<Habitat> {
        let mut votes = Vec::new();
        for key in ["natural", "landuse"] {
            if let Some(h) = tags.get(key).and_then(|v| Habitat::from_feature_value(v)) {
                votes.push(h);
            }
        }
        for key in ["water", "wetland", "waterway"] {
            if tags.contains_key(key) {
                votes.push(Habitat::Wetland);
            }
        }
        votes
    }
}

impl fmt::Display for Habitat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Habitat {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Habitat::ALL
            .iter()
            .copied()
            .find(|h| h.as_str() == normalized)
            .ok_or_else(|| ContextError::UnknownHabitat {
                value: s.to_string(),
            })
    }
}

/// Habitat composition around a survey location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitatReport {
    pub primary: Habitat,
    /// Share of mapped features voting for the primary habitat.
    pub confidence: f64,
    /// Secondary habitats with at least a 10% share.
    pub hybrid: BTreeMap<Habitat, f64>,
}

impl Default for HabitatReport {
    fn default() -> Self {
        Self {
            primary: Habitat::Unknown,
            confidence: 0.0,
            hybrid: BTreeMap::new(),
        }
    }
}

impl HabitatReport {
    /// Build a report from the tags of every map feature near the location.
    pub fn from_features(features: &[BTreeMap<String, String>]) -> Self {
        let mut counts: BTreeMap<Habitat, usize> = BTreeMap::new();
        for tags in features {
            for habitat in Habitat::classify_feature(tags) {
                *counts.entry(habitat).or_insert(0) += 1;
            }
        }
        Self::from_counts(&counts)
    }

    /// Build a report from per-habitat feature counts.
    pub fn from_counts(counts: &BTreeMap<Habitat, usize>) -> Self {
        let total: usize = counts.values().sum();
        if total == 0 {
            return Self::default();
        }

        let shares: BTreeMap<Habitat, f64> = counts
            .iter()
            .map(|(h, c)| (*h, *c as f64 / total as f64))
            .collect();

        let mut primary = Habitat::Unknown;
        let mut confidence = f64::MIN;
        for (habitat, share) in &shares {
            if *share > confidence {
                primary = *habitat;
                confidence = *share;
            }
        }

        let hybrid = shares
            .into_iter()
            .filter(|(h, share)| *h != primary && *share >= HYBRID_HABITAT_MIN_SHARE)
            .collect();

        Self {
            primary,
            confidence,
            hybrid,
        }
    }

    /// Human-readable composition, e.g. `wetland (70%), forest (30%)`.
    pub fn describe(&self) -> String {
        if self.primary == Habitat::Unknown {
            return "unknown".to_string();
        }
        let mut parts = vec![format!("{} ({:.0}%)", self.primary, self.confidence * 100.0)];
        let mut hybrid: Vec<(&Habitat, &f64)> = self.hybrid.iter().collect();
        hybrid.sort_by(|a, b| b.1.total_cmp(a.1));
        for (habitat, share) in hybrid {
            parts.push(format!("{} ({:.0}%)", habitat, share * 100.0));
        }
        parts.join(", ")
    }
}
