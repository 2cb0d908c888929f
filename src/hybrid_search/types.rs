//! Result types for hybrid search.

use serde::{Deserialize, Serialize};

use crate::document::Ayat;

/// Which channel(s) admitted a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Keyword channel only.
    Keyword,
    /// Semantic channel only.
    Semantic,
    /// Both channels scored positive.
    Both,
}

/// One ranked hybrid search result.
///
/// Carries a copy of the verse's text fields plus the per-channel and fused
/// scores. Scores are nominally in [0, 1]; the fusion formula does not
/// hard-clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Verse id within its corpus.
    pub id: u32,
    /// Arabic text.
    pub arab: String,
    /// Latin transliteration.
    pub latin: String,
    /// Indonesian translation.
    pub terjemahan: String,
    /// Commentary.
    pub tafsir: String,
    /// Keyword channel score.
    pub bm25_score: f32,
    /// Semantic channel score.
    pub semantic_score: f32,
    /// Fused ranking score.
    pub hybrid_score: f32,
    /// Which channel(s) matched.
    pub match_type: MatchType,
}

impl SearchResult {
    /// Build a result from a verse and its channel scores.
    pub fn from_ayat(
        ayat: &Ayat,
        bm25_score: f32,
        semantic_score: f32,
        hybrid_score: f32,
        match_type: MatchType,
    ) -> Self {
        Self {
            id: ayat.id,
            arab: ayat.arab.clone(),
            latin: ayat.latin.clone(),
            terjemahan: ayat.terjemahan.clone(),
            tafsir: ayat.tafsir.clone(),
            bm25_score,
            semantic_score,
            hybrid_score,
            match_type,
        }
    }
}
