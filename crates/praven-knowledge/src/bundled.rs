//! Default tables compiled into the binary.

/// Curated per-species profiles.
pub const SPECIES_TOML: &str = include_str!("../data/species.toml");

/// Family rules, order rules and species exceptions.
pub const TAXONOMY_TOML: &str = include_str!("../data/taxonomy.toml");
