//! # quality-vector
//!
//! Similarity index for corpus embeddings.
//!
//! The corpus is tens of quality-standard documents, so the index is an
//! exact cosine scan rather than an approximate structure. The
//! `SimilarityIndex` trait keeps the seam where an ANN backend could slot
//! in if corpora ever grow past what a scan can serve.
//!
//! Ranking is fully deterministic: scores clamp to [0, 1] and ties within
//! a configurable epsilon break by document id ascending.

pub mod cosine;
pub mod error;
pub mod index;

pub use cosine::CosineIndex;
pub use error::VectorError;
pub use index::{IndexStats, SearchResult, SimilarityIndex};
