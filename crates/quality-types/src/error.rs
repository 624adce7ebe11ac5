//! Error types shared across the engine.

use thiserror::Error;

/// Unified error type for engine operations.
///
/// Only configuration-level problems are fatal to a request; component
/// failures (embedding, single-machine scoring) degrade locally and are
/// reported through response `degradations` instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error - surfaced to the caller, fails fast
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid request payload
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// An internal subsystem failed in a way that could not be contained
    #[error("Internal error: {0}")]
    Internal(String),
}
