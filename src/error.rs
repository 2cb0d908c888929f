//! Error types for the mushaf-search library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`MushafError`] enum.

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for mushaf-search operations.
#[derive(Error, Debug)]
pub enum MushafError {
    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Text analysis errors (normalization, tokenization).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Query-related errors (empty terms, invalid queries).
    #[error("Query error: {0}")]
    Query(String),

    /// Index-related errors.
    #[error("Index error: {0}")]
    Index(String),

    /// Corpus fetch errors reported by a [`CorpusProvider`].
    ///
    /// [`CorpusProvider`]: crate::manager::CorpusProvider
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Opaque search failure surfaced at the manager boundary.
    #[error("Search error: {0}")]
    Search(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`MushafError`].
pub type Result<T> = std::result::Result<T, MushafError>;

impl MushafError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        MushafError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        MushafError::Query(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        MushafError::Index(msg.into())
    }

    /// Create a new fetch error.
    pub fn fetch<S: Into<String>>(msg: S) -> Self {
        MushafError::Fetch(msg.into())
    }

    /// Create a new search error.
    pub fn search<S: Into<String>>(msg: S) -> Self {
        MushafError::Search(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        MushafError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        MushafError::Other(format!("Internal error: {}", msg.into()))
    }
}
