//! # quality-retrieval
//!
//! Standards corpus store and semantic retrieval.
//!
//! The retriever embeds a free-text query, restricts the corpus to the
//! requested industry *before* ranking (filter-then-rank, so a non-matching
//! but highly similar document never displaces a matching one), scans the
//! cached corpus embeddings for cosine similarity and returns the top K
//! with 1-based ranks assigned post-sort.

pub mod corpus;
pub mod error;
pub mod retriever;
pub mod seed;

pub use corpus::{InMemoryCorpus, StandardCorpus};
pub use error::RetrievalError;
pub use retriever::StandardsRetriever;
pub use seed::seed_standards;
