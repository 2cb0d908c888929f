//! Aggregation helpers over hybrid search results.
//!
//! These operate on plain result lists and carry no engine state; the UI
//! layer uses them for summaries and result shaping.

use serde::{Deserialize, Serialize};

use super::types::{MatchType, SearchResult};

/// Summary statistics for one executed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMetrics {
    pub total_results: usize,
    pub keyword_matches: usize,
    pub semantic_matches: usize,
    pub hybrid_matches: usize,
    /// Mean scores, rounded to two decimals.
    pub average_bm25_score: f32,
    pub average_semantic_score: f32,
    pub average_hybrid_score: f32,
    /// Wall-clock execution time reported by the caller.
    pub execution_time_ms: u64,
}

impl SearchMetrics {
    /// Aggregate a result list.
    pub fn calculate(results: &[SearchResult], execution_time_ms: u64) -> Self {
        let keyword_matches = results
            .iter()
            .filter(|r| r.match_type == MatchType::Keyword)
            .count();
        let semantic_matches = results
            .iter()
            .filter(|r| r.match_type == MatchType::Semantic)
            .count();
        let hybrid_matches = results
            .iter()
            .filter(|r| r.match_type == MatchType::Both)
            .count();

        Self {
            total_results: results.len(),
            keyword_matches,
            semantic_matches,
            hybrid_matches,
            average_bm25_score: round2(mean(results, |r| r.bm25_score)),
            average_semantic_score: round2(mean(results, |r| r.semantic_score)),
            average_hybrid_score: round2(mean(results, |r| r.hybrid_score)),
            execution_time_ms,
        }
    }
}

/// Results bucketed by match type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedResults {
    pub keyword: Vec<SearchResult>,
    pub semantic: Vec<SearchResult>,
    pub both: Vec<SearchResult>,
}

/// Split results into per-match-type buckets, preserving order.
pub fn group_by_match_type(results: &[SearchResult]) -> GroupedResults {
    let mut grouped = GroupedResults::default();
    for result in results {
        match result.match_type {
            MatchType::Keyword => grouped.keyword.push(result.clone()),
            MatchType::Semantic => grouped.semantic.push(result.clone()),
            MatchType::Both => grouped.both.push(result.clone()),
        }
    }
    grouped
}

/// Keep results whose fused score clears `min_hybrid_score`, or whose two
/// channel scores both clear their respective floors.
pub fn filter_by_score(
    results: &[SearchResult],
    min_hybrid_score: f32,
    min_bm25_score: f32,
    min_semantic_score: f32,
) -> Vec<SearchResult> {
    results
        .iter()
        .filter(|r| {
            r.hybrid_score >= min_hybrid_score
                || (r.bm25_score >= min_bm25_score && r.semantic_score >= min_semantic_score)
        })
        .cloned()
        .collect()
}

/// Re-rank so double-agreement matches come first, then by fused score.
pub fn rank_by_relevance(results: &[SearchResult]) -> Vec<SearchResult> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| {
        let a_both = a.match_type == MatchType::Both;
        let b_both = b.match_type == MatchType::Both;
        b_both.cmp(&a_both).then_with(|| {
            b.hybrid_score
                .partial_cmp(&a.hybrid_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
    ranked
}

/// Drop duplicate ids, keeping the first occurrence.
///
/// Used after concatenating per-surah result lists.
pub fn deduplicate(results: &[SearchResult]) -> Vec<SearchResult> {
    let mut seen = ahash::AHashSet::new();
    results
        .iter()
        .filter(|r| seen.insert(r.id))
        .cloned()
        .collect()
}

fn mean(results: &[SearchResult], score: impl Fn(&SearchResult) -> f32) -> f32 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(score).sum::<f32>() / results.len() as f32
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
