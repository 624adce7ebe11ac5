//! # quality-equipment
//!
//! Machine catalog contract and deterministic equipment scoring.
//!
//! Scoring is a pure function of the machine record, the part requirement
//! and the candidate set (cycle-time efficiency is relative). Five weighted
//! criteria total a raw 110 points, normalized to the familiar 0-100 scale.
//! Hard floors (work envelope, tolerance capability, material
//! compatibility) exclude a machine outright instead of ranking it last.

pub mod catalog;
pub mod scorer;
pub mod seed;

pub use catalog::{InMemoryCatalog, MachineCatalog};
pub use scorer::{
    EquipmentScorer, AUTOMATION_WEIGHT, CYCLE_WEIGHT, OPERATIONS_WEIGHT, RAW_MAX, SIZE_WEIGHT,
    TOLERANCE_WEIGHT,
};
pub use seed::seed_machines;
