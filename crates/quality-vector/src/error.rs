//! Vector index error types.

use thiserror::Error;

/// Errors that can occur during index operations.
#[derive(Debug, Error)]
pub enum VectorError {
    /// Vector length does not match the index dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A vector with this id is already indexed
    #[error("Duplicate vector id: {0}")]
    DuplicateId(String),
}
