//! Validation layer
//!
//! - `rule_engine`: independent checks emitting severity-tagged issues
//! - `tier_classifier`: pure issue-severity → tier decision table
//! - `result_builder`: final report assembly
//! - `cover_art`: sibling validator for the accompanying image

pub mod cover_art;
pub mod result_builder;
pub mod rule_engine;
pub mod tier_classifier;

pub use cover_art::CoverArtValidator;
pub use result_builder::{build_result, describe_profile, dedup_recommendations};
pub use rule_engine::{Findings, RuleEngine};
pub use tier_classifier::{classify, meets_premium_bar};
