//! Configuration for hybrid search.

use serde::{Deserialize, Serialize};

/// Tunable weights and admission floors for hybrid search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridSearchConfig {
    /// Weight of the keyword (BM25-style) score in the fused score.
    pub bm25_weight: f32,
    /// Weight of the pseudo-semantic similarity in the fused score.
    pub semantic_weight: f32,
    /// Minimum keyword score for single-channel admission.
    pub min_bm25_threshold: f32,
    /// Minimum semantic similarity for single-channel admission.
    pub min_semantic_threshold: f32,
}

/// Default configuration. The keyword floor is deliberately low: fuzzy
/// scores over folded Arabic text run small.
pub const DEFAULT_HYBRID_CONFIG: HybridSearchConfig = HybridSearchConfig {
    bm25_weight: 0.5,
    semantic_weight: 0.5,
    min_bm25_threshold: 0.05,
    min_semantic_threshold: 0.2,
};

impl Default for HybridSearchConfig {
    fn default() -> Self {
        DEFAULT_HYBRID_CONFIG
    }
}

impl HybridSearchConfig {
    /// Apply a partial update, leaving unspecified fields untouched.
    pub fn apply(&mut self, update: &HybridSearchConfigUpdate) {
        if let Some(v) = update.bm25_weight {
            self.bm25_weight = v;
        }
        if let Some(v) = update.semantic_weight {
            self.semantic_weight = v;
        }
        if let Some(v) = update.min_bm25_threshold {
            self.min_bm25_threshold = v;
        }
        if let Some(v) = update.min_semantic_threshold {
            self.min_semantic_threshold = v;
        }
    }

    /// A copy of the defaults with a partial update applied.
    pub fn from_update(update: &HybridSearchConfigUpdate) -> Self {
        let mut config = Self::default();
        config.apply(update);
        config
    }
}

/// Partial configuration: only the populated fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HybridSearchConfigUpdate {
    pub bm25_weight: Option<f32>,
    pub semantic_weight: Option<f32>,
    pub min_bm25_threshold: Option<f32>,
    pub min_semantic_threshold: Option<f32>,
}
