//! # quality-types
//!
//! Shared domain types for the quality planning engine.
//!
//! This crate defines the core data structures used throughout the system:
//! - Standards: quality-standard documents and retrieval results
//! - Machines: catalog records and scored recommendations
//! - Parts: part requirements submitted by callers
//! - Plans: assembled quality-control plans with degradation tracking
//! - Settings: layered engine configuration
//!
//! All enumerations serialize as lowercase strings for cross-language
//! interop; numeric fields use standard floating point.

pub mod config;
pub mod error;
pub mod machine;
pub mod part;
pub mod plan;
pub mod standard;

pub use config::{
    EmbeddingSettings, EngineConfig, PlanSettings, RetrievalSettings, ScoringSettings,
};
pub use error::EngineError;
pub use machine::{
    AutomationLevel, MachineCategory, MachineRecord, Operation, ScoredMachine, WorkEnvelope,
};
pub use part::{Dimensions, PartRequirement, ToleranceSpec};
pub use plan::{
    ControlMethod, Degradation, InspectionMethod, InspectionPoint, PlanResponse, QualityPlan,
    RecommendationResponse, RetrainReport,
};
pub use standard::{RetrievedStandard, StandardCategory, StandardDocument};
