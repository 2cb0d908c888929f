//! In-memory vector store over verse embeddings.
//!
//! Holds one embedding per document id, built from the verse's four text
//! fields joined with spaces. Search is a brute-force cosine scan: the
//! corpus is at most one surah, or all 114 surahs indexed surah-by-surah,
//! so there is nothing to gain from an ANN structure here.

use ahash::AHashMap;

use crate::document::Ayat;
use crate::embedding::{HashEmbedder, Vector, cosine_similarity};

/// A single vector search result.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorHit {
    /// Id of the matched document.
    pub doc_id: u32,
    /// Cosine similarity against the query embedding.
    pub similarity: f32,
}

/// Brute-force cosine-similarity store keyed by document id.
pub struct VectorStore {
    embedder: HashEmbedder,
    vectors: AHashMap<u32, Vector>,
    documents: AHashMap<u32, Ayat>,
    /// Ids in first-indexed order, for deterministic iteration.
    order: Vec<u32>,
}

impl VectorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            embedder: HashEmbedder::new(),
            vectors: AHashMap::new(),
            documents: AHashMap::new(),
            order: Vec::new(),
        }
    }

    /// Embed and store every document.
    ///
    /// Indexing an id that is already present overwrites its vector and
    /// document; it never duplicates.
    pub fn index_documents(&mut self, documents: &[Ayat]) {
        for doc in documents {
            let vector = self.embedder.embed(&doc.combined_text());
            if self.vectors.insert(doc.id, vector).is_none() {
                self.order.push(doc.id);
            }
            self.documents.insert(doc.id, doc.clone());
        }
    }

    /// Embed the query and return the `top_k` most similar documents,
    /// descending by similarity. Ties keep indexing order.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<VectorHit> {
        if self.vectors.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let query_vector = self.embedder.embed(query);
        let mut hits: Vec<VectorHit> = self
            .order
            .iter()
            .filter_map(|doc_id| {
                self.vectors.get(doc_id).map(|vector| VectorHit {
                    doc_id: *doc_id,
                    similarity: cosine_similarity(&query_vector, vector),
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);
        hits
    }

    /// Look up a stored document by id.
    pub fn document(&self, doc_id: u32) -> Option<&Ayat> {
        self.documents.get(&doc_id)
    }

    /// Stored vector for a document id.
    pub fn vector(&self, doc_id: u32) -> Option<&Vector> {
        self.vectors.get(&doc_id)
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the store holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Drop all stored vectors and documents.
    pub fn clear(&mut self) {
        self.vectors.clear();
        self.documents.clear();
        self.order.clear();
    }
}

impl Default for VectorStore {
    fn default() -> Self {
        Self::new()
    }
}
