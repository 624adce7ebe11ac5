//! Exact cosine-scan index.

use quality_embeddings::Embedding;
use tracing::trace;

use crate::error::VectorError;
use crate::index::{IndexStats, SearchResult, SimilarityIndex};

/// Default tie-break epsilon: scores closer than this count as equal.
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Brute-force cosine index over a small corpus.
pub struct CosineIndex {
    dimension: usize,
    epsilon: f32,
    entries: Vec<(String, Embedding)>,
}

impl CosineIndex {
    pub fn new(dimension: usize) -> Self {
        Self::with_epsilon(dimension, DEFAULT_EPSILON)
    }

    pub fn with_epsilon(dimension: usize, epsilon: f32) -> Self {
        Self {
            dimension,
            epsilon,
            entries: Vec::new(),
        }
    }
}

impl SimilarityIndex for CosineIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn add(&mut self, id: &str, embedding: &Embedding) -> Result<(), VectorError> {
        if embedding.dimension() != self.dimension {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.dimension(),
            });
        }
        if self.entries.iter().any(|(existing, _)| existing == id) {
            return Err(VectorError::DuplicateId(id.to_string()));
        }
        self.entries.push((id.to_string(), embedding.clone()));
        Ok(())
    }

    fn search(&self, query: &Embedding, k: usize) -> Vec<SearchResult> {
        let mut hits: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|(id, embedding)| SearchResult::new(id.clone(), query.similarity(embedding)))
            .collect();

        // Strict score-descending sort first; an epsilon comparator is not
        // a total order when near-ties chain
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));

        // Runs within epsilon of their best score reorder by id ascending
        let mut start = 0;
        while start < hits.len() {
            let anchor = hits[start].score;
            let mut end = start + 1;
            while end < hits.len() && anchor - hits[end].score <= self.epsilon {
                end += 1;
            }
            hits[start..end].sort_by(|a, b| a.id.cmp(&b.id));
            start = end;
        }
        hits.truncate(k);

        trace!(results = hits.len(), k, "cosine scan complete");
        hits
    }

    fn stats(&self) -> IndexStats {
        IndexStats {
            vector_count: self.entries.len(),
            dimension: self.dimension,
        }
    }
}
