//! Hybrid search engine implementation.

use ahash::AHashMap;
use tracing::debug;

use super::config::{HybridSearchConfig, HybridSearchConfigUpdate};
use super::types::{MatchType, SearchResult};
use crate::document::Ayat;
use crate::lexical::LexicalIndex;
use crate::vector::VectorStore;

/// Boost applied when only the keyword channel scored.
const KEYWORD_ONLY_BOOST: f32 = 0.9;

/// Boost applied when only the semantic channel scored.
///
/// Single-channel matches are rewarded almost as much as a blended match,
/// but never treated as equal to confirmed double agreement.
const SEMANTIC_ONLY_BOOST: f32 = 0.95;

/// Default result cap for [`HybridSearchEngine::search`].
pub const DEFAULT_TOP_K: usize = 20;

/// Hybrid search engine over one corpus.
///
/// Builds both the lexical index and the vector store eagerly at
/// construction. Documents are owned and never mutated.
pub struct HybridSearchEngine {
    documents: Vec<Ayat>,
    lexical: LexicalIndex,
    vectors: VectorStore,
    config: HybridSearchConfig,
}

impl HybridSearchEngine {
    /// Build an engine over a corpus with default configuration.
    pub fn new(documents: Vec<Ayat>) -> Self {
        Self::with_config(documents, &HybridSearchConfigUpdate::default())
    }

    /// Build an engine over a corpus, with a partial config applied over
    /// the defaults.
    pub fn with_config(documents: Vec<Ayat>, update: &HybridSearchConfigUpdate) -> Self {
        let config = HybridSearchConfig::from_update(update);
        let lexical = LexicalIndex::new(&documents);
        let mut vectors = VectorStore::new();
        vectors.index_documents(&documents);

        Self {
            documents,
            lexical,
            vectors,
            config,
        }
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Run both channels, fuse their scores and return up to `top_k`
    /// results, descending by fused score. Ties keep corpus order.
    ///
    /// A candidate is admitted when at least one channel clears its
    /// configured floor. When both channels score positive the fused score
    /// is the weighted blend; a single positive channel gets its score with
    /// a mild boost instead.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchResult> {
        if self.documents.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let bm25_scores: AHashMap<u32, f32> = self
            .lexical
            .search(query)
            .into_iter()
            .map(|hit| (hit.doc_id, hit.score))
            .collect();

        // A generous candidate pool so fusion has room to reorder.
        let semantic_scores: AHashMap<u32, f32> = self
            .vectors
            .search(query, top_k * 2)
            .into_iter()
            .map(|hit| (hit.doc_id, hit.similarity))
            .collect();

        let mut results = Vec::new();
        // Walking the corpus keeps candidate order deterministic.
        for doc in &self.documents {
            let bm25 = bm25_scores.get(&doc.id).copied().unwrap_or(0.0);
            let semantic = semantic_scores.get(&doc.id).copied().unwrap_or(0.0);
            if bm25 == 0.0 && semantic == 0.0 {
                continue;
            }

            // Admission gate: drop candidates neither channel is confident
            // about.
            if bm25 < self.config.min_bm25_threshold
                && semantic < self.config.min_semantic_threshold
            {
                continue;
            }

            let (hybrid, match_type) = if bm25 > 0.0 && semantic > 0.0 {
                (
                    bm25 * self.config.bm25_weight + semantic * self.config.semantic_weight,
                    MatchType::Both,
                )
            } else if bm25 > 0.0 {
                (bm25 * KEYWORD_ONLY_BOOST, MatchType::Keyword)
            } else {
                (semantic * SEMANTIC_ONLY_BOOST, MatchType::Semantic)
            };

            results.push(SearchResult::from_ayat(doc, bm25, semantic, hybrid, match_type));
        }

        results.sort_by(|a, b| {
            b.hybrid_score
                .partial_cmp(&a.hybrid_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        debug!(
            candidates = bm25_scores.len() + semantic_scores.len(),
            returned = results.len(),
            "hybrid search completed"
        );
        results
    }

    /// Merge a partial config into the live config. Affects subsequent
    /// searches only.
    pub fn update_config(&mut self, update: &HybridSearchConfigUpdate) {
        self.config.apply(update);
    }

    /// A defensive copy of the live config.
    pub fn get_config(&self) -> HybridSearchConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_corpus() -> Vec<Ayat> {
        vec![
            Ayat::new(
                1,
                "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ",
                "bismillaahir-rahmaanir-rahiim",
                "Dengan nama Allah Yang Maha Pengasih, Maha Penyayang.",
                "",
            ),
            Ayat::new(
                2,
                "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ",
                "alhamdu lillaahi rabbil-'aalamiin",
                "Segala puji bagi Allah, Tuhan seluruh alam.",
                "",
            ),
            Ayat::new(
                3,
                "مَالِكِ يَوْمِ الدِّينِ",
                "maaliki yaumid-diin",
                "Pemilik hari pembalasan.",
                "",
            ),
        ]
    }

    #[test]
    fn test_keyword_query_finds_verse() {
        let engine = HybridSearchEngine::new(sample_corpus());
        let results = engine.search("Allah", DEFAULT_TOP_K);

        assert!(!results.is_empty());
        let bismillah = results
            .iter()
            .find(|r| r.id == 1)
            .expect("verse 1 should match");
        assert!(bismillah.hybrid_score > 0.0);
        assert!(matches!(
            bismillah.match_type,
            MatchType::Keyword | MatchType::Both
        ));
    }

    #[test]
    fn test_empty_corpus_returns_empty() {
        let engine = HybridSearchEngine::new(Vec::new());
        assert!(engine.is_empty());
        assert!(engine.search("allah", DEFAULT_TOP_K).is_empty());
    }

    #[test]
    fn test_admission_gate_holds() {
        let engine = HybridSearchEngine::new(sample_corpus());
        let config = engine.get_config();
        for query in ["allah", "pengasih", "الرحمن", "hari pembalasan"] {
            for result in engine.search(query, DEFAULT_TOP_K) {
                assert!(
                    result.bm25_score >= config.min_bm25_threshold
                        || result.semantic_score >= config.min_semantic_threshold,
                    "gate violated for query {query:?}: {result:?}"
                );
            }
        }
    }

    #[test]
    fn test_results_sorted_descending() {
        let engine = HybridSearchEngine::new(sample_corpus());
        let results = engine.search("allah", DEFAULT_TOP_K);
        for pair in results.windows(2) {
            assert!(pair[0].hybrid_score >= pair[1].hybrid_score);
        }
    }

    #[test]
    fn test_top_k_cap() {
        let engine = HybridSearchEngine::new(sample_corpus());
        let results = engine.search("allah", 1);
        assert!(results.len() <= 1);
        assert!(engine.search("allah", 0).is_empty());
    }

    #[test]
    fn test_both_channels_blend() {
        let engine = HybridSearchEngine::new(sample_corpus());
        let config = engine.get_config();
        let results = engine.search("dengan nama allah", DEFAULT_TOP_K);

        for result in &results {
            if result.match_type == MatchType::Both {
                let expected = result.bm25_score * config.bm25_weight
                    + result.semantic_score * config.semantic_weight;
                assert!((result.hybrid_score - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_single_channel_boost() {
        let engine = HybridSearchEngine::new(sample_corpus());
        for result in engine.search("pembalasan", DEFAULT_TOP_K) {
            match result.match_type {
                MatchType::Keyword => {
                    assert!((result.hybrid_score - result.bm25_score * 0.9).abs() < 1e-6);
                }
                MatchType::Semantic => {
                    assert!((result.hybrid_score - result.semantic_score * 0.95).abs() < 1e-6);
                }
                MatchType::Both => {}
            }
        }
    }

    #[test]
    fn test_update_config_affects_next_search() {
        let mut engine = HybridSearchEngine::new(sample_corpus());
        // Raise both floors so nothing can pass the gate.
        engine.update_config(&HybridSearchConfigUpdate {
            min_bm25_threshold: Some(2.0),
            min_semantic_threshold: Some(2.0),
            ..Default::default()
        });
        assert!(engine.search("allah", DEFAULT_TOP_K).is_empty());

        let config = engine.get_config();
        assert_eq!(config.min_bm25_threshold, 2.0);
        // get_config returns a copy; mutating it must not touch the engine.
        let mut copy = config;
        copy.min_bm25_threshold = 0.0;
        assert_eq!(engine.get_config().min_bm25_threshold, 2.0);
    }
}
