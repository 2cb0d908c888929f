//! Hybrid search combining fuzzy keyword scoring and pseudo-semantic
//! vector similarity.
//!
//! The two channels run independently over the same corpus and their
//! per-document scores are fused into one ranking:
//! - precise, edit-distance-tolerant keyword matching,
//! - structural similarity through deterministic hash embeddings,
//! - configurable weighting and per-channel admission floors.

pub mod config;
pub mod engine;
pub mod metrics;
pub mod types;

pub use config::{DEFAULT_HYBRID_CONFIG, HybridSearchConfig, HybridSearchConfigUpdate};
pub use engine::HybridSearchEngine;
pub use metrics::{GroupedResults, SearchMetrics};
pub use types::{MatchType, SearchResult};
