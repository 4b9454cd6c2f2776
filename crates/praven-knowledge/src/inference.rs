//! Taxonomic inference from common names.
//!
//! Rules are scanned top to bottom and the first rule with a pattern contained
//! in the name wins. A name matching patterns of two rules therefore resolves
//! to whichever rule is listed first; there is no specificity ranking.

use crate::knowledge_base::{normalize_name, KnowledgeBase};
use crate::tables::TaxonomicRule;

/// First rule whose pattern occurs in `common_name` (case-insensitive).
pub(crate) fn match_rule<'a>(
    rules: &'a [TaxonomicRule],
    common_name: &str,
) -> Option<&'a TaxonomicRule> {
    let name = normalize_name(common_name);
    if name.is_empty() {
        return None;
    }
    rules.iter().find(|rule| rule.matches_lowercase(&name))
}

/// Infer the family of a species from its common name.
pub fn infer_family<'a>(kb: &'a KnowledgeBase, common_name: &str) -> Option<&'a str> {
    match_rule(kb.families(), common_name).map(|r| r.name.as_str())
}

/// Infer the order of a species from its common name, using the order table only.
pub fn infer_order<'a>(kb: &'a KnowledgeBase, common_name: &str) -> Option<&'a str> {
    match_rule(kb.orders(), common_name).map(|r| r.name.as_str())
}
