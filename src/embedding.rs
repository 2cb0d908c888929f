//! Deterministic pseudo-embeddings for verse text.
//!
//! This is not a learned model. Text maps to a fixed 384-dimensional vector
//! through character/position/frequency hashing, so that shared words,
//! shared leading characters and shared word order produce nearby vectors.
//! The point is to give the fusion layer a second, differently shaped
//! relevance signal without any external model dependency.

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Output dimension of every embedding.
pub const EMBEDDING_DIM: usize = 384;

/// A fixed-length embedding vector.
///
/// Non-empty text embeds to a unit-magnitude vector; empty text embeds to
/// the all-zero vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// Vector components.
    pub data: Vec<f32>,
}

impl Vector {
    /// Create a vector from raw components.
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// The all-zero vector of [`EMBEDDING_DIM`] components.
    pub fn zeros() -> Self {
        Self {
            data: vec![0.0; EMBEDDING_DIM],
        }
    }

    /// Euclidean magnitude.
    pub fn magnitude(&self) -> f32 {
        self.data.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Scale to unit magnitude. A zero vector is left untouched.
    pub fn normalize(&mut self) {
        let magnitude = self.magnitude();
        if magnitude > 0.0 {
            for v in &mut self.data {
                *v /= magnitude;
            }
        }
    }
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &Vector, b: &Vector) -> f32 {
    let mut dot = 0.0f32;
    let mut mag_a = 0.0f32;
    let mut mag_b = 0.0f32;

    for (x, y) in a.data.iter().zip(b.data.iter()) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    mag_a = mag_a.sqrt();
    mag_b = mag_b.sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}

/// Hash-based embedding generator with a memo cache.
///
/// Embedding is a pure function of the normalized text, so vectors are
/// cached by normalized text rather than by document id; documents with
/// identical normalized text share one cache entry.
pub struct HashEmbedder {
    cache: RwLock<AHashMap<String, Vector>>,
}

impl HashEmbedder {
    /// Create a new embedder with an empty cache.
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Embed text into a 384-dimensional unit vector.
    pub fn embed(&self, text: &str) -> Vector {
        let normalized = crate::analysis::normalize(text);

        if let Some(cached) = self.cache.read().get(&normalized) {
            return cached.clone();
        }

        let vector = Self::compute(&normalized);
        self.cache
            .write()
            .insert(normalized, vector.clone());
        vector
    }

    /// Number of cached vectors.
    pub fn cache_len(&self) -> usize {
        self.cache.read().len()
    }

    /// Drop all cached vectors.
    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }

    fn compute(normalized: &str) -> Vector {
        let mut vector = Vector::zeros();
        let words: Vec<&str> = normalized
            .split_whitespace()
            .filter(|w| !w.is_empty())
            .collect();

        // Character/position pass: earlier words and earlier characters
        // within a word carry more weight.
        for (i, word) in words.iter().enumerate() {
            let word_weight = 1.0 / (i as f32 + 1.0);
            for (j, ch) in word.chars().enumerate() {
                let code = ch as usize;
                let index = (code * 7 + i * 31 + j * 13) % EMBEDDING_DIM;
                let char_weight = 1.0 / (j as f32 + 1.0);
                vector.data[index] += word_weight * char_weight;
            }
        }

        // Coarse term-frequency pass keyed off each distinct word's first
        // character.
        let mut word_freq: AHashMap<&str, usize> = AHashMap::new();
        for word in &words {
            *word_freq.entry(*word).or_insert(0) += 1;
        }
        for (word, freq) in &word_freq {
            if let Some(first) = word.chars().next() {
                let index = (first as usize * 11) % EMBEDDING_DIM;
                vector.data[index] += (*freq as f32 + 1.0).ln() * 0.5;
            }
        }

        vector.normalize();
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}
