//! # praven-knowledge
//!
//! Species Knowledge Base: a curated per-species table, ordered family and
//! order rule tables, and a per-species exceptions table.
//!
//! Built once, validated at load time, then shared immutably (`Arc`) by every
//! evaluator. Profile resolution follows a fixed precedence:
//! exception → curated → family inference → order inference → unknown.

pub mod bundled;
pub mod inference;
pub mod knowledge_base;
pub mod tables;

pub use inference::{infer_family, infer_order};
pub use knowledge_base::{Coverage, KnowledgeBase};
pub use tables::{Species, TaxonomicRule};
