//! Search manager: local and global search entry points.
//!
//! [`SearchManager`] is an explicit, caller-constructed context that owns
//! the engine configuration, a surah-corpus cache and a normalized-term
//! cache. There is no hidden global instance; a process that wants
//! one-per-process semantics constructs one at its composition root.
//!
//! Global search fans out the 114 per-surah fetches concurrently and joins
//! them; a failing surah degrades to an empty contribution rather than
//! aborting the whole search. The caches are only touched between await
//! points, so plain locks held for the duration of a map operation are
//! enough.

use ahash::AHashMap;
use futures::future::join_all;
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis;
use crate::document::{Ayat, SurahData};
use crate::error::{MushafError, Result};
use crate::hybrid_search::{HybridSearchConfig, HybridSearchConfigUpdate, HybridSearchEngine};
use crate::lexical::{FieldWeights, LexicalConfig, LexicalIndex};

/// Number of surahs in the Quran.
pub const SURAH_COUNT: u32 = 114;

/// Hybrid results below this fused score fall through to the fuzzy
/// fallback pass.
const MIN_HYBRID_SCORE: f32 = 0.4;

/// Result cap requested from the hybrid engine per surah.
const PER_SURAH_TOP_K: usize = 50;

/// Fuzzy fallback tolerance for Arabic queries.
const FALLBACK_THRESHOLD_ARABIC: f32 = 0.25;

/// Fuzzy fallback tolerance for Latin/translation queries.
const FALLBACK_THRESHOLD_LATIN: f32 = 0.3;

/// Which script a query was detected as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchLanguage {
    /// Query contains Arabic-range codepoints.
    Arab,
    /// Latin/translation query.
    Indonesia,
}

/// The verse field a fallback match landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Arab,
    Latin,
    Terjemahan,
    Tafsir,
}

/// One formatted result as returned to the reading interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSearchResult {
    /// The matched verse.
    pub ayat: Ayat,
    /// Surah the verse belongs to.
    pub surah_number: u32,
    /// Short display name of the surah.
    pub surah_name: String,
    /// Occurrence count of the term in the counted fields.
    pub match_count: usize,
    /// Field the match was attributed to.
    pub match_field: MatchField,
    /// Detected query script.
    pub search_language: SearchLanguage,
}

/// Asynchronous source of surah corpora.
///
/// The manager performs no network I/O itself; callers supply an
/// implementation backed by whatever fetch layer they use.
#[allow(async_fn_in_trait)]
pub trait CorpusProvider {
    /// Fetch one surah by number (1 through 114).
    async fn fetch_surah(&self, number: u32) -> Result<SurahData>;
}

/// Caller-constructed search context.
pub struct SearchManager {
    config: HybridSearchConfigUpdate,
    surah_cache: RwLock<AHashMap<u32, SurahData>>,
    term_cache: RwLock<AHashMap<String, String>>,
}

impl SearchManager {
    /// Create a manager with default engine configuration.
    pub fn new() -> Self {
        Self::with_config(HybridSearchConfigUpdate::default())
    }

    /// Create a manager with a partial engine configuration applied over
    /// the defaults for every search.
    pub fn with_config(config: HybridSearchConfigUpdate) -> Self {
        Self {
            config,
            surah_cache: RwLock::new(AHashMap::new()),
            term_cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Merge a partial config into the manager's engine configuration.
    pub fn update_config(&mut self, update: &HybridSearchConfigUpdate) {
        let mut merged = HybridSearchConfig::from_update(&self.config);
        merged.apply(update);
        self.config = HybridSearchConfigUpdate {
            bm25_weight: Some(merged.bm25_weight),
            semantic_weight: Some(merged.semantic_weight),
            min_bm25_threshold: Some(merged.min_bm25_threshold),
            min_semantic_threshold: Some(merged.min_semantic_threshold),
        };
    }

    /// The engine configuration searches will run with.
    pub fn config(&self) -> HybridSearchConfig {
        HybridSearchConfig::from_update(&self.config)
    }

    /// Search within one already-fetched surah.
    ///
    /// Fails fast on an empty or whitespace-only term. Results are sorted
    /// by descending match count; the sort is stable, so the hybrid
    /// ranking is preserved among equal counts.
    pub fn search_local(
        &self,
        term: &str,
        surah: &SurahData,
    ) -> Result<Vec<FormattedSearchResult>> {
        if term.trim().is_empty() {
            return Err(MushafError::query("Search term cannot be empty"));
        }

        let clean_term = self.normalize_term(term);
        let language = detect_language(term);

        let mut results = self
            .search_in_surah(surah, &clean_term, language)
            .map_err(|err| {
                warn!(surah = surah.number, error = %err, "local search failed");
                MushafError::search("search failed")
            })?;
        results.sort_by(|a, b| b.match_count.cmp(&a.match_count));
        Ok(results)
    }

    /// Search across all 114 surahs.
    ///
    /// Fetches (or reuses cached) corpora concurrently. A surah whose fetch
    /// or search fails contributes nothing; the union of the surahs that
    /// did succeed is returned, sorted by descending match count.
    pub async fn search_global<P: CorpusProvider>(
        &self,
        term: &str,
        provider: &P,
    ) -> Result<Vec<FormattedSearchResult>> {
        if term.trim().is_empty() {
            return Err(MushafError::query("Search term cannot be empty"));
        }

        let clean_term = self.normalize_term(term);
        let language = detect_language(term);
        debug!(term = %clean_term, "starting global search");

        let searches = (1..=SURAH_COUNT).map(|number| {
            let clean_term = clean_term.clone();
            async move {
                match self.surah_with_cache(provider, number).await {
                    Ok(surah) => self
                        .search_in_surah(&surah, &clean_term, language)
                        .unwrap_or_else(|err| {
                            warn!(surah = number, error = %err, "surah search failed");
                            Vec::new()
                        }),
                    Err(err) => {
                        warn!(surah = number, error = %err, "surah fetch failed");
                        Vec::new()
                    }
                }
            }
        });

        let mut results: Vec<FormattedSearchResult> =
            join_all(searches).await.into_iter().flatten().collect();
        // Join order follows fetch completion, not surah order; sort
        // explicitly.
        results.sort_by(|a, b| b.match_count.cmp(&a.match_count));
        Ok(results)
    }

    /// Drop both the surah cache and the normalized-term cache.
    pub fn clear_cache(&self) {
        self.surah_cache.write().clear();
        self.term_cache.write().clear();
    }

    /// Number of cached surahs. Exposed for tests and diagnostics.
    pub fn cached_surah_count(&self) -> usize {
        self.surah_cache.read().len()
    }

    fn normalize_term(&self, term: &str) -> String {
        if let Some(cached) = self.term_cache.read().get(term) {
            return cached.clone();
        }
        let normalized = analysis::normalize_term(term);
        self.term_cache
            .write()
            .insert(term.to_string(), normalized.clone());
        normalized
    }

    async fn surah_with_cache<P: CorpusProvider>(
        &self,
        provider: &P,
        number: u32,
    ) -> Result<SurahData> {
        if let Some(cached) = self.surah_cache.read().get(&number) {
            return Ok(cached.clone());
        }
        let surah = provider.fetch_surah(number).await?;
        self.surah_cache.write().insert(number, surah.clone());
        Ok(surah)
    }

    /// Hybrid pass over one surah, falling back to a plain fuzzy pass when
    /// nothing clears the hybrid floor.
    fn search_in_surah(
        &self,
        surah: &SurahData,
        clean_term: &str,
        language: SearchLanguage,
    ) -> Result<Vec<FormattedSearchResult>> {
        let engine = HybridSearchEngine::with_config(surah.verses.clone(), &self.config);
        let hybrid_results = engine.search(clean_term, PER_SURAH_TOP_K);

        let mut results: Vec<FormattedSearchResult> = hybrid_results
            .into_iter()
            .filter(|r| r.hybrid_score >= MIN_HYBRID_SCORE)
            .filter_map(|r| {
                surah.verses.iter().find(|v| v.id == r.id).map(|ayat| {
                    FormattedSearchResult {
                        ayat: ayat.clone(),
                        surah_number: surah.number,
                        surah_name: surah.name.short.clone(),
                        match_count: 1,
                        match_field: MatchField::Arab,
                        search_language: language,
                    }
                })
            })
            .collect();

        if results.is_empty() {
            results = self.fallback_search(surah, clean_term, language)?;
        }

        Ok(results)
    }

    /// Plain fuzzy pass with stricter, script-dependent thresholds.
    fn fallback_search(
        &self,
        surah: &SurahData,
        clean_term: &str,
        language: SearchLanguage,
    ) -> Result<Vec<FormattedSearchResult>> {
        let config = match language {
            SearchLanguage::Arab => LexicalConfig {
                threshold: FALLBACK_THRESHOLD_ARABIC,
                min_match_len: 2,
                field_weights: FieldWeights {
                    arab: 0.6,
                    latin: 0.2,
                    terjemahan: 0.2,
                    tafsir: 0.0,
                },
            },
            SearchLanguage::Indonesia => LexicalConfig {
                threshold: FALLBACK_THRESHOLD_LATIN,
                min_match_len: 2,
                field_weights: FieldWeights {
                    arab: 0.0,
                    latin: 0.3,
                    terjemahan: 0.5,
                    tafsir: 0.2,
                },
            },
        };

        let index = LexicalIndex::with_config(&surah.verses, config);
        let mut results = Vec::new();

        for hit in index.search(clean_term) {
            let Some(ayat) = surah.verses.iter().find(|v| v.id == hit.doc_id) else {
                continue;
            };
            let match_count = count_matches(ayat, clean_term, language)?;
            if match_count > 0 {
                results.push(FormattedSearchResult {
                    ayat: ayat.clone(),
                    surah_number: surah.number,
                    surah_name: surah.name.short.clone(),
                    match_count,
                    match_field: match language {
                        SearchLanguage::Arab => MatchField::Arab,
                        SearchLanguage::Indonesia => MatchField::Terjemahan,
                    },
                    search_language: language,
                });
            }
        }

        Ok(results)
    }
}

impl Default for SearchManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the query script from the raw term.
fn detect_language(term: &str) -> SearchLanguage {
    if analysis::has_arabic(term) {
        SearchLanguage::Arab
    } else {
        SearchLanguage::Indonesia
    }
}

/// Count occurrences of the term in the fields relevant to the detected
/// script.
///
/// Arabic terms are counted as raw substring occurrences in the Arabic
/// text; Latin terms as whole-word, case-insensitive occurrences in the
/// translation, transliteration and commentary.
fn count_matches(ayat: &Ayat, term: &str, language: SearchLanguage) -> Result<usize> {
    match language {
        SearchLanguage::Arab => {
            let folded_term = analysis::normalize_arabic(term);
            if folded_term.is_empty() {
                return Ok(0);
            }
            let folded_text = analysis::normalize_arabic(&ayat.arab);
            Ok(folded_text.matches(&folded_term).count())
        }
        SearchLanguage::Indonesia => {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
            let re = Regex::new(&pattern)
                .map_err(|err| MushafError::internal(format!("bad match pattern: {err}")))?;
            let count = [&ayat.terjemahan, &ayat.latin, &ayat.tafsir]
                .into_iter()
                .map(|text| re.find_iter(text).count())
                .sum();
            Ok(count)
        }
    }
}
