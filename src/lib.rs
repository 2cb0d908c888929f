//! # mushaf-search
//!
//! Hybrid search over Quran verse corpora: a fuzzy keyword channel and a
//! deterministic pseudo-semantic channel, fused into one ranking.
//!
//! ## Features
//!
//! - Arabic/Latin text normalization with recall-widening letter folding
//! - Edit-distance-tolerant lexical scoring with per-field weights
//! - Deterministic 384-dimensional hash embeddings (no model, no network)
//! - In-memory vector store with cosine top-k search
//! - Configurable score fusion with per-channel admission floors
//! - Local (one surah) and global (all 114 surahs) search entry points

pub mod analysis;
pub mod document;
pub mod embedding;
pub mod error;
pub mod hybrid_search;
pub mod lexical;
pub mod manager;
pub mod util;
pub mod vector;

pub use document::{Ayat, SurahData, SurahName};
pub use error::{MushafError, Result};
pub use hybrid_search::{
    HybridSearchConfig, HybridSearchConfigUpdate, HybridSearchEngine, MatchType, SearchResult,
};
pub use manager::{CorpusProvider, FormattedSearchResult, SearchManager};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
