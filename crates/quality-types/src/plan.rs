//! Assembled quality plans and engine responses.

use serde::{Deserialize, Serialize};

use crate::machine::ScoredMachine;
use crate::standard::RetrievedStandard;

/// Inspection method assigned to a toleranced feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InspectionMethod {
    /// CMM-grade inspection for tight tolerances
    Cmm,
    /// Manual gauge inspection for everything else
    ManualGauge,
}

/// A derived inspection point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionPoint {
    pub feature: String,
    pub tolerance: f64,
    pub unit: String,
    pub method: InspectionMethod,
}

/// Process control methods included in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlMethod {
    StatisticalProcessControl,
    FirstArticleInspection,
    FullTraceability,
    FinalInspection,
}

/// A structured quality-control plan.
///
/// Created fresh per request and never mutated after assembly. Persistence
/// is a collaborator concern; the core does not store plans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityPlan {
    /// Top-N standards matched to the part, best first
    pub relevant_standards: Vec<RetrievedStandard>,
    pub inspection_points: Vec<InspectionPoint>,
    pub control_methods: Vec<ControlMethod>,
    /// One entry per tolerance, mirrored verbatim with unit
    pub acceptance_criteria: Vec<String>,
    /// Generated natural-language recommendations, priority order
    pub ai_recommendations: Vec<String>,
}

/// A subsystem that degraded while serving a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Degradation {
    /// Subsystem name (e.g., "standards-retrieval")
    pub subsystem: String,
    pub reason: String,
}

/// Response envelope for plan generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: QualityPlan,
    pub degraded: bool,
    #[serde(default)]
    pub degradations: Vec<Degradation>,
}

/// Response envelope for machine recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Top machines, best first; may be empty
    pub machines: Vec<ScoredMachine>,
    pub degraded: bool,
    #[serde(default)]
    pub degradations: Vec<Degradation>,
    /// Explanation when the list is empty (e.g., no feasible equipment)
    #[serde(default)]
    pub note: Option<String>,
}

impl PlanResponse {
    pub fn new(plan: QualityPlan, degradations: Vec<Degradation>) -> Self {
        Self {
            degraded: !degradations.is_empty(),
            plan,
            degradations,
        }
    }
}

impl RecommendationResponse {
    pub fn new(machines: Vec<ScoredMachine>, degradations: Vec<Degradation>) -> Self {
        Self {
            degraded: !degradations.is_empty(),
            machines,
            degradations,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Result of an explicit embedding retrain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrainReport {
    pub documents_processed: usize,
    /// Active strategy identifier (e.g., "all-MiniLM-L6-v2", "tfidf-384")
    pub strategy_used: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_plan() -> QualityPlan {
        QualityPlan {
            relevant_standards: vec![],
            inspection_points: vec![],
            control_methods: vec![],
            acceptance_criteria: vec![],
            ai_recommendations: vec![],
        }
    }

    #[test]
    fn degraded_flag_tracks_degradations() {
        let clean = PlanResponse::new(empty_plan(), vec![]);
        assert!(!clean.degraded);

        let degraded = PlanResponse::new(
            empty_plan(),
            vec![Degradation {
                subsystem: "standards-retrieval".to_string(),
                reason: "corpus empty".to_string(),
            }],
        );
        assert!(degraded.degraded);
        assert_eq!(degraded.degradations.len(), 1);
    }

    #[test]
    fn control_method_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ControlMethod::StatisticalProcessControl).unwrap(),
            "\"statistical-process-control\""
        );
        assert_eq!(
            serde_json::to_string(&InspectionMethod::ManualGauge).unwrap(),
            "\"manual-gauge\""
        );
    }
}
