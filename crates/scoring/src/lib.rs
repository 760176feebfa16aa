//! Relevance scoring and ranking for device catalogs.
//!
//! The pipeline runs strictly in this order:
//! 1. Validation: drop records any processor cannot use
//! 2. Context: per-category {min, max} over the validated set
//! 3. Scoring: every processor scores every record, weighted and summed
//! 4. Ranking: stable sort by total, truncated to top-N

mod config;
mod context;
mod engine;
pub mod processors;
mod rank;
mod registry;
mod validate;

pub use config::{DisplayBlend, ScoringConfig};
pub use context::{build_context, NormalizationContext, PartialContext};
pub use engine::ScoringEngine;
pub use processors::CategoryProcessor;
pub use rank::rank;
pub use registry::ProcessorRegistry;
pub use validate::{is_valid, validate_catalog};
