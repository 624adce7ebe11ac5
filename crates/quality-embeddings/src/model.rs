//! Embedding vector type and the strategy trait.

use crate::error::EmbeddingError;

/// A fixed-length embedding vector, unit-normalized on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    values: Vec<f32>,
}

impl Embedding {
    /// Create an embedding, normalizing to unit length.
    ///
    /// An all-zero input stays all-zero; zero vectors are the degraded
    /// form of a document whose embedding failed.
    pub fn new(values: Vec<f32>) -> Self {
        let norm: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            Self {
                values: values.iter().map(|x| x / norm).collect(),
            }
        } else {
            Self { values }
        }
    }

    /// Zero vector of the given dimension.
    ///
    /// Used when embedding a document fails: the document stays in the
    /// corpus with similarity 0 against every query.
    pub fn zero(dimension: usize) -> Self {
        Self {
            values: vec![0.0; dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Cosine similarity in [-1, 1]. Both vectors are unit-normalized so
    /// this is just the dot product. Mismatched dimensions yield 0.
    pub fn cosine(&self, other: &Embedding) -> f32 {
        if self.values.len() != other.values.len() {
            return 0.0;
        }
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Cosine similarity clamped to [0, 1].
    ///
    /// Negative cosine means "anti-relevant", which has no sensible
    /// meaning for ranking display, so it floors to 0.
    pub fn similarity(&self, other: &Embedding) -> f32 {
        self.cosine(other).clamp(0.0, 1.0)
    }
}

/// Strategy metadata.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Strategy identifier (e.g., "all-MiniLM-L6-v2", "tfidf-384").
    /// Part of the embedding cache key: changing strategy invalidates
    /// cached corpus embeddings.
    pub name: String,
    /// Output dimension, constant across the corpus
    pub dimension: usize,
    /// Maximum input length in tokens (0 = unbounded)
    pub max_sequence_length: usize,
}

/// An embedding strategy.
///
/// Implementations must be deterministic for a fixed strategy and
/// thread-safe for concurrent use.
pub trait EmbeddingModel: Send + Sync {
    fn info(&self) -> &ModelInfo;

    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;

    /// Embed a batch of texts. Default implementation embeds one at a time.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_produces_unit_length() {
        let emb = Embedding::new(vec![3.0, 4.0]);
        assert!((emb.values()[0] - 0.6).abs() < 1e-6);
        assert!((emb.values()[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_survives_normalization() {
        let emb = Embedding::new(vec![0.0, 0.0, 0.0]);
        assert!(emb.is_zero());
        assert_eq!(emb.dimension(), 3);
    }

    #[test]
    fn identical_vectors_have_similarity_one() {
        let a = Embedding::new(vec![1.0, 2.0, 3.0]);
        let b = Embedding::new(vec![1.0, 2.0, 3.0]);
        assert!((a.similarity(&b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_clamp_to_zero() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![-1.0, 0.0]);
        assert!((a.cosine(&b) + 1.0).abs() < 1e-6);
        assert_eq!(a.similarity(&b), 0.0);
    }

    #[test]
    fn mismatched_dimensions_score_zero() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![1.0, 0.0, 0.0]);
        assert_eq!(a.similarity(&b), 0.0);
    }
}
