//! Part requirements submitted by callers.
//!
//! A `PartRequirement` is the query object for both plan generation and
//! machine recommendation. Its numeric payload is supplied by an external
//! feature-extraction collaborator; this crate only validates shape.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::machine::Operation;

/// Part dimensions in mm.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A single toleranced feature on the part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceSpec {
    /// Feature name (e.g., "diameter", "concentricity")
    pub feature: String,
    /// Plus/minus tolerance magnitude
    pub tolerance: f64,
    /// Unit string, mirrored verbatim into acceptance criteria
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "mm".to_string()
}

/// Everything the engine needs to know about a part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartRequirement {
    /// Free-text part description used as the retrieval query seed
    pub description: String,
    pub material: String,
    /// Optional industry filter for standards retrieval (lowercase)
    #[serde(default)]
    pub industry: Option<String>,
    pub dimensions: Dimensions,
    pub required_operations: BTreeSet<Operation>,
    /// Expected annual production volume, must be > 0
    pub annual_volume: u32,
    /// Smallest required tolerance across all features
    pub target_tolerance: f64,
    /// Per-feature tolerances
    #[serde(default)]
    pub tolerances: Vec<ToleranceSpec>,
}

impl PartRequirement {
    /// Validate the payload before it reaches scoring or retrieval.
    pub fn validate(&self) -> Result<(), String> {
        if self.annual_volume == 0 {
            return Err("annual_volume must be > 0".to_string());
        }
        if self.target_tolerance <= 0.0 {
            return Err(format!(
                "target_tolerance must be positive, got {}",
                self.target_tolerance
            ));
        }
        if self.dimensions.x < 0.0 || self.dimensions.y < 0.0 || self.dimensions.z < 0.0 {
            return Err("dimensions must be non-negative".to_string());
        }
        if self.required_operations.is_empty() {
            return Err("at least one required operation is needed".to_string());
        }
        Ok(())
    }

    /// Retrieval query text combining the description with material,
    /// industry and tolerance context.
    pub fn query_text(&self) -> String {
        let tolerances = self
            .tolerances
            .iter()
            .map(|t| format!("{}: \u{b1}{}{}", t.feature, t.tolerance, t.unit))
            .collect::<Vec<_>>()
            .join(", ");
        let mut query = format!(
            "Manufacturing part: {}\nMaterial: {}",
            self.description, self.material
        );
        if let Some(industry) = &self.industry {
            query.push_str(&format!("\nIndustry: {industry}"));
        }
        if !tolerances.is_empty() {
            query.push_str(&format!("\nTolerances: {tolerances}"));
        }
        query
    }

    /// Tolerance entries strictly below the given threshold.
    pub fn tight_tolerances(&self, threshold: f64) -> Vec<&ToleranceSpec> {
        self.tolerances
            .iter()
            .filter(|t| t.tolerance < threshold)
            .collect()
    }
}
