//! # quality-embeddings
//!
//! Embedding strategies for quality-standard retrieval.
//!
//! Two interchangeable strategies produce vectors of the same fixed
//! dimension so downstream similarity math never cares which is active:
//! - Neural: all-MiniLM-L6-v2 via Candle (384 dimensions, local inference)
//! - Fallback: a TF-IDF vectorizer fit over the corpus, vocabulary capped
//!   at the model dimension
//!
//! The neural model load site has a timeout; load failure or timeout fails
//! over to the fallback rather than erroring out. Corpus embeddings live in
//! a generation-swapped store: retrain builds a complete new generation
//! off-lock and publishes it atomically while readers keep serving the
//! previous one.

pub mod error;
pub mod files;
pub mod model;
pub mod neural;
pub mod provider;
pub mod store;
pub mod tfidf;

pub use error::EmbeddingError;
pub use files::{ModelFileCache, ModelPaths, MODEL_FILES};
pub use model::{Embedding, EmbeddingModel, ModelInfo};
pub use neural::{NeuralEmbedder, EMBEDDING_DIM, MAX_SEQ_LENGTH};
pub use provider::{EmbeddingProvider, SharedProvider, Strategy};
pub use store::{EmbeddingGeneration, EmbeddingStore, RebuildStats};
pub use tfidf::TfIdfEmbedder;
