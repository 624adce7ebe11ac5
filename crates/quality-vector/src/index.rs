//! Similarity index trait and result types.

use quality_embeddings::Embedding;

use crate::error::VectorError;

/// A single search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Document id the vector was indexed under
    pub id: String,
    /// Similarity in [0, 1], higher is more similar
    pub score: f32,
}

impl SearchResult {
    pub fn new(id: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// Index statistics.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    pub vector_count: usize,
    pub dimension: usize,
}

/// Trait for similarity indexes.
///
/// Implementations must be thread-safe for concurrent read access and
/// return results best-first with deterministic tie-breaking.
pub trait SimilarityIndex: Send + Sync {
    /// The embedding dimension this index accepts.
    fn dimension(&self) -> usize;

    /// Number of indexed vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a vector under the given id.
    fn add(&mut self, id: &str, embedding: &Embedding) -> Result<(), VectorError>;

    /// Top-k nearest neighbors, best first.
    ///
    /// Returns fewer than k results when the index holds fewer vectors.
    /// An empty index yields an empty list, not an error.
    fn search(&self, query: &Embedding, k: usize) -> Vec<SearchResult>;

    fn stats(&self) -> IndexStats;
}
