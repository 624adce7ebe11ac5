//! Retrieval error types.

use thiserror::Error;

/// Errors that can occur during standards retrieval.
///
/// These are contained by the plan assembler: a failed retrieval degrades
/// the plan's standards section instead of failing the request.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Query embedding failed
    #[error("Embedding error: {0}")]
    Embedding(#[from] quality_embeddings::EmbeddingError),

    /// Index construction failed
    #[error("Index error: {0}")]
    Vector(#[from] quality_vector::VectorError),
}
