//! Machine catalog records and scored recommendations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::part::Dimensions;

/// Machine category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MachineCategory {
    Lathe,
    Mill,
    #[serde(rename = "5-axis-mill")]
    FiveAxisMill,
    Cmm,
    OpticalCmm,
    Other,
}

/// Automation level, ordered from least to most automated.
///
/// The derive order matters: `Manual < SemiAuto < FullAuto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutomationLevel {
    Manual,
    SemiAuto,
    FullAuto,
}

/// A machining or inspection operation a machine can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Turning,
    Milling,
    Drilling,
    Boring,
    Threading,
    Grinding,
    Inspection,
}

/// Maximum part dimensions a machine can accept, per axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorkEnvelope {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorkEnvelope {
    /// Whether a part of the given dimensions fits on every axis.
    pub fn fits(&self, part: &Dimensions) -> bool {
        part.x <= self.x && part.y <= self.y && part.z <= self.z
    }

    /// Smallest per-axis slack ratio (envelope / part dimension).
    ///
    /// Returns `None` when the part does not fit. A zero part dimension
    /// contributes no constraint on that axis.
    pub fn slack_ratio(&self, part: &Dimensions) -> Option<f64> {
        if !self.fits(part) {
            return None;
        }
        let mut ratio = f64::INFINITY;
        for (env, dim) in [(self.x, part.x), (self.y, part.y), (self.z, part.z)] {
            if dim > 0.0 {
                ratio = ratio.min(env / dim);
            }
        }
        Some(ratio)
    }
}

/// An immutable machine catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineRecord {
    /// Stable identifier (e.g., "haas-st-30")
    pub id: String,
    pub name: String,
    pub manufacturer: String,
    pub category: MachineCategory,
    /// List price in USD
    pub price: f64,
    pub work_envelope: WorkEnvelope,
    /// Smallest guaranteed tolerance, in mm
    pub tolerance_capability: f64,
    pub automation_level: AutomationLevel,
    pub supported_operations: BTreeSet<Operation>,
    /// Relative throughput metric; lower is faster
    pub cycle_time_factor: f64,
    /// Compatible material names (lowercase)
    pub material_compatibility: BTreeSet<String>,
}

impl MachineRecord {
    /// Whether the machine can cut the given material.
    ///
    /// Substring match in either direction so a requirement of
    /// "Aluminum 6061-T6" matches a catalog entry of "aluminum".
    pub fn supports_material(&self, material: &str) -> bool {
        let needle = material.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.material_compatibility
            .iter()
            .any(|m| needle.contains(m.as_str()) || m.contains(&needle))
    }
}

/// A machine with its recommendation score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMachine {
    pub machine: MachineRecord,
    /// Final score on the 0-100 scale
    pub score: u32,
    /// Dominant contributing/detracting factors plus operation gaps
    pub reasons: Vec<String>,
    /// Fraction of required operations the machine supports
    pub capability_match: f32,
}
