//! Fuzzy lexical (BM25-style) scoring over normalized verse fields.
//!
//! The index keeps a normalized copy of each verse's text fields and scores
//! a query by edit-distance-tolerant matching against field words, with
//! per-field weights that favor the Arabic text most heavily. Scores are in
//! [0, 1], higher is better.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis;
use crate::document::Ayat;
use crate::util::levenshtein;

/// Relative weights of the four verse fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    pub arab: f32,
    pub latin: f32,
    pub terjemahan: f32,
    pub tafsir: f32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            arab: 0.6,
            latin: 0.2,
            terjemahan: 0.15,
            tafsir: 0.05,
        }
    }
}

/// Configuration for the fuzzy lexical index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalConfig {
    /// Maximum tolerated match distance, as edit distance scaled by the
    /// longer input's length. A match at exactly this distance is kept.
    pub threshold: f32,
    /// Queries shorter than this many characters never match.
    pub min_match_len: usize,
    /// Per-field weights.
    pub field_weights: FieldWeights,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            min_match_len: 1,
            field_weights: FieldWeights::default(),
        }
    }
}

/// A scored lexical match.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalHit {
    /// Id of the matched document.
    pub doc_id: u32,
    /// Relevance score in [0, 1].
    pub score: f32,
}

/// One indexed field: normalized text plus its word list.
#[derive(Debug, Clone)]
struct IndexedField {
    text: String,
    words: Vec<String>,
}

impl IndexedField {
    fn new(normalized: String) -> Self {
        let words = normalized
            .unicode_words()
            .map(str::to_string)
            .collect();
        Self {
            text: normalized,
            words,
        }
    }
}

/// Normalized, cached view of one verse.
#[derive(Debug, Clone)]
struct IndexedAyat {
    doc_id: u32,
    arab: IndexedField,
    latin: IndexedField,
    terjemahan: IndexedField,
    tafsir: IndexedField,
}

/// Fuzzy term index over a corpus of verses.
pub struct LexicalIndex {
    docs: Vec<IndexedAyat>,
    config: LexicalConfig,
}

impl LexicalIndex {
    /// Build an index over the given documents with default configuration.
    pub fn new(documents: &[Ayat]) -> Self {
        Self::with_config(documents, LexicalConfig::default())
    }

    /// Build an index over the given documents.
    ///
    /// Arabic, Latin and translation text are normalized once here; tafsir
    /// is indexed as-is (it is free text, often empty).
    pub fn with_config(documents: &[Ayat], config: LexicalConfig) -> Self {
        let docs = documents
            .iter()
            .map(|doc| IndexedAyat {
                doc_id: doc.id,
                arab: IndexedField::new(analysis::normalize_arabic(&doc.arab)),
                latin: IndexedField::new(analysis::normalize_latin(&doc.latin)),
                terjemahan: IndexedField::new(analysis::normalize_latin(&doc.terjemahan)),
                tafsir: IndexedField::new(doc.tafsir.clone()),
            })
            .collect();
        Self { docs, config }
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Score the query against every document, descending by score.
    ///
    /// When the full query finds nothing and is longer than one character,
    /// retries with progressively shorter prefixes, starting at half the
    /// query length and stopping at two characters. Zero hits is a
    /// legitimate outcome, not an error.
    pub fn search(&self, query: &str) -> Vec<LexicalHit> {
        let normalized = analysis::normalize(query);
        let mut hits = self.search_pass(&normalized);

        let query_len = normalized.chars().count();
        if hits.is_empty() && query_len > 1 {
            for len in (2..=query_len.div_ceil(2)).rev() {
                let prefix: String = normalized.chars().take(len).collect();
                hits = self.search_pass(&prefix);
                if !hits.is_empty() {
                    break;
                }
            }
        }

        hits
    }

    /// One scoring pass with the query taken verbatim.
    fn search_pass(&self, query: &str) -> Vec<LexicalHit> {
        if query.chars().count() < self.config.min_match_len {
            return Vec::new();
        }

        let query_words: Vec<&str> = query.split_whitespace().collect();
        let weights = self.config.field_weights;
        let mut hits = Vec::new();

        for doc in &self.docs {
            let fields = [
                (&doc.arab, weights.arab),
                (&doc.latin, weights.latin),
                (&doc.terjemahan, weights.terjemahan),
                (&doc.tafsir, weights.tafsir),
            ];

            let mut score = 0.0f32;
            let mut matched = false;
            for (field, weight) in fields {
                if let Some(dist) = self.field_distance(field, query, &query_words) {
                    score += weight * (1.0 - dist).max(0.0);
                    matched = true;
                }
            }

            if matched && score > 0.0 {
                hits.push(LexicalHit {
                    doc_id: doc.doc_id,
                    score: score.min(1.0),
                });
            }
        }

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }

    /// Best match distance of the query within one field, if it clears the
    /// configured tolerance.
    ///
    /// Exact substring containment counts as distance zero; otherwise the
    /// query is compared against every word (or word window, for multi-word
    /// queries) of the field.
    fn field_distance(
        &self,
        field: &IndexedField,
        query: &str,
        query_words: &[&str],
    ) -> Option<f32> {
        if field.text.is_empty() {
            return None;
        }
        if field.text.contains(query) {
            return Some(0.0);
        }

        let threshold = self.config.threshold;
        let mut best: Option<f32> = None;

        let mut consider = |candidate: &str| {
            let longest = candidate.chars().count().max(query.chars().count());
            if longest == 0 {
                return;
            }
            let max_edits = (threshold * longest as f32).floor() as usize;
            if let Some(edits) = levenshtein::bounded_distance(query, candidate, max_edits) {
                let dist = edits as f32 / longest as f32;
                if best.is_none_or(|b| dist < b) {
                    best = Some(dist);
                }
            }
        };

        let span = query_words.len().max(1);
        if span == 1 {
            for word in &field.words {
                consider(word);
            }
        } else {
            for window in field.words.windows(span) {
                consider(&window.join(" "));
            }
        }

        best.filter(|d| *d <= threshold)
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
                "الرَّحْمَٰنِ الرَّحِيمِ",
                "ar-rahmaanir-rahiim",
                "Yang Maha Pengasih, Maha Penyayang.",
                "",
            ),
        ]
    }

    #[test]
    fn test_exact_translation_match() {
        let index = LexicalIndex::new(&sample_corpus());
        let hits = index.search("Allah");

        assert!(!hits.is_empty());
        let ids: Vec<u32> = hits.iter().map(|h| h.doc_id).collect();
        assert!(ids.contains(&1));
        assert!(ids.contains(&2));
        assert!(hits.iter().all(|h| h.score > 0.0 && h.score <= 1.0));
    }

    #[test]
    fn test_arabic_query_with_diacritics() {
        let index = LexicalIndex::new(&sample_corpus());
        // Query carries harakat; index side is already stripped.
        let hits = index.search("اللَّهِ");
        assert!(!hits.is_empty());
    }

    #[test]
    fn test_arabic_exact_match_scores_highest_field() {
        let index = LexicalIndex::new(&sample_corpus());
        let hits = index.search("الرحمن");
        assert!(!hits.is_empty());
        // Substring match on the arab field alone contributes 0.6.
        assert!(hits[0].score >= 0.6);
    }

    #[test]
    fn test_descending_order() {
        let index = LexicalIndex::new(&sample_corpus());
        let hits = index.search("maha pengasih");
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_no_match_returns_empty() {
        let index = LexicalIndex::new(&sample_corpus());
        let hits = index.search("zzzzqqqq");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_prefix_retry_recovers_hits() {
        let index = LexicalIndex::new(&sample_corpus());
        // The full junk-suffixed query misses; its prefix "peng..." hits.
        let hits = index.search("pengasihzzzzzzzz");
        assert!(!hits.is_empty());
    }

    #[test]
    fn test_min_match_len_gate() {
        let config = LexicalConfig {
            min_match_len: 2,
            ..LexicalConfig::default()
        };
        let index = LexicalIndex::with_config(&sample_corpus(), config);
        assert!(index.search("a").is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let index = LexicalIndex::new(&[]);
        assert!(index.is_empty());
        assert!(index.search("allah").is_empty());
    }

    #[test]
    fn test_empty_tafsir_tolerated() {
        let corpus = vec![Ayat::new(1, "نور", "nur", "cahaya", "")];
        let index = LexicalIndex::new(&corpus);
        let hits = index.search("cahaya");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc_id, 1);
    }
}
