//! # quality-plan
//!
//! Quality-control plan assembly.
//!
//! The assembler merges retrieved standards with rule-derived inspection
//! points, control methods and acceptance criteria, then invokes the
//! insight generator for natural-language recommendations. Every step
//! degrades independently: a failed retrieval yields a plan with an empty
//! standards section and a degradation flag, never an aborted request.
//!
//! Insights are an ordered list of independent predicate-to-message rules
//! evaluated in a fixed sequence, so output ordering is stable across runs
//! and individual rules are testable in isolation.

pub mod assembler;
pub mod insight;

pub use assembler::PlanAssembler;
pub use insight::{default_rules, InsightContext, InsightGenerator, InsightRule};
