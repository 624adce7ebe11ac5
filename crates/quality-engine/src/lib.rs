//! # quality-engine
//!
//! Facade for the quality planning and equipment recommendation engine.
//!
//! Wires the embedding provider, corpus embedding store, standards
//! retriever, equipment scorer and plan assembler together and exposes the
//! three engine operations:
//!
//! - [`QualityEngine::generate_plan`]: part requirement in, structured
//!   quality plan out
//! - [`QualityEngine::recommend_machines`]: part requirement in, ranked
//!   equipment out
//! - [`QualityEngine::retrain_embeddings`]: rebuild the corpus embedding
//!   generation, re-attempting the neural strategy
//!
//! Responses always carry a `degraded` flag plus the list of subsystems
//! that degraded, so callers can distinguish a clean empty result from a
//! partial one.

pub mod engine;

pub use engine::QualityEngine;

pub use quality_equipment::{InMemoryCatalog, MachineCatalog};
pub use quality_retrieval::{InMemoryCorpus, StandardCorpus};
pub use quality_types::{
    EngineConfig, EngineError, PartRequirement, PlanResponse, QualityPlan,
    RecommendationResponse, RetrainReport, ScoredMachine,
};
