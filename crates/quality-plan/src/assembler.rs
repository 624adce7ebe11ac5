//! Quality plan assembly.

use std::sync::Arc;

use tracing::{debug, warn};

use quality_retrieval::StandardsRetriever;
use quality_types::{
    ControlMethod, Degradation, InspectionMethod, InspectionPoint, PartRequirement, PlanSettings,
    QualityPlan, RetrievedStandard,
};

use crate::insight::{InsightContext, InsightGenerator};

/// Standard ids whose presence among the retrieved standards mandates
/// first article inspection and full traceability.
const REGULATED_MARKERS: &[&str] = &["AS9100", "13485"];

/// Assembles quality plans from retrieval output and rule evaluation.
pub struct PlanAssembler {
    retriever: Arc<StandardsRetriever>,
    insights: InsightGenerator,
    settings: PlanSettings,
}

impl PlanAssembler {
    pub fn new(retriever: Arc<StandardsRetriever>, settings: PlanSettings) -> Self {
        Self {
            retriever,
            insights: InsightGenerator::new(),
            settings,
        }
    }

    /// Build a plan for the requirement.
    ///
    /// Deterministic for identical inputs and an unchanged corpus; the
    /// active embedding strategy is the only permitted variation and is
    /// not part of the plan state. Returns the plan plus any subsystem
    /// degradations encountered along the way.
    pub fn assemble(&self, requirement: &PartRequirement) -> (QualityPlan, Vec<Degradation>) {
        let mut degradations = Vec::new();

        // Step 1: standards retrieval; total failure degrades to an empty
        // standards section instead of aborting the plan
        let relevant_standards = match self.retriever.retrieve_default(
            &requirement.query_text(),
            requirement.industry.as_deref(),
        ) {
            Ok(standards) => standards,
            Err(e) => {
                warn!(error = %e, "standards retrieval failed, assembling degraded plan");
                degradations.push(Degradation {
                    subsystem: "standards-retrieval".to_string(),
                    reason: e.to_string(),
                });
                vec![]
            }
        };

        // Step 2: inspection points from the tolerance list
        let inspection_points = self.inspection_points(requirement);

        // Step 3: control methods from tolerance tightness and the
        // retrieved standards
        let control_methods = self.control_methods(requirement, &relevant_standards);

        // Step 4: acceptance criteria mirror each tolerance verbatim
        let acceptance_criteria = requirement
            .tolerances
            .iter()
            .map(|t| format!("{}: \u{b1}{}{}", t.feature, t.tolerance, t.unit))
            .collect();

        // Step 5: generated recommendations
        let ai_recommendations = self.insights.generate(&InsightContext {
            requirement,
            standards: &relevant_standards,
            tight_tolerance_threshold: self.settings.tight_tolerance_threshold,
        });

        debug!(
            standards = relevant_standards.len(),
            inspection_points = inspection_points.len(),
            recommendations = ai_recommendations.len(),
            degraded = !degradations.is_empty(),
            "plan assembled"
        );

        (
            QualityPlan {
                relevant_standards,
                inspection_points,
                control_methods,
                acceptance_criteria,
                ai_recommendations,
            },
            degradations,
        )
    }

    /// Tight tolerances get CMM-grade inspection; everything else defaults
    /// to manual gauging.
    fn inspection_points(&self, requirement: &PartRequirement) -> Vec<InspectionPoint> {
        requirement
            .tolerances
            .iter()
            .map(|t| InspectionPoint {
                feature: t.feature.clone(),
                tolerance: t.tolerance,
                unit: t.unit.clone(),
                method: if t.tolerance < self.settings.tight_tolerance_threshold {
                    InspectionMethod::Cmm
                } else {
                    InspectionMethod::ManualGauge
                },
            })
            .collect()
    }

    fn control_methods(
        &self,
        requirement: &PartRequirement,
        standards: &[RetrievedStandard],
    ) -> Vec<ControlMethod> {
        let mut methods = Vec::new();

        let has_tight = !requirement
            .tight_tolerances(self.settings.tight_tolerance_threshold)
            .is_empty();
        if has_tight {
            methods.push(ControlMethod::StatisticalProcessControl);
        }

        let regulated = standards.iter().any(|s| {
            REGULATED_MARKERS
                .iter()
                .any(|marker| s.standard.id.contains(marker))
        });
        if regulated {
            methods.push(ControlMethod::FirstArticleInspection);
            methods.push(ControlMethod::FullTraceability);
        }

        methods.push(ControlMethod::FinalInspection);
        methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quality_embeddings::{EmbeddingProvider, EmbeddingStore, SharedProvider};
    use quality_retrieval::{InMemoryCorpus, StandardCorpus};
    use quality_types::{
        Dimensions, EmbeddingSettings, Operation, RetrievalSettings, ToleranceSpec,
    };

    fn assembler_over(corpus: InMemoryCorpus) -> PlanAssembler {
        let docs: Vec<(String, String)> = corpus
            .list_all()
            .iter()
            .map(|d| (d.id.clone(), d.embedding_text()))
            .collect();
        let texts: Vec<String> = docs.iter().map(|(_, t)| t.clone()).collect();

        let settings = EmbeddingSettings {
            neural_enabled: false,
            ..EmbeddingSettings::default()
        };
        let provider = EmbeddingProvider::fallback(&settings, &texts);
        let store = Arc::new(EmbeddingStore::new());
        store.rebuild(&provider, &docs);

        let retriever = Arc::new(StandardsRetriever::new(
            Arc::new(SharedProvider::new(provider)),
            store,
            Arc::new(corpus),
            RetrievalSettings::default(),
        ));
        PlanAssembler::new(retriever, PlanSettings::default())
    }

    fn requirement() -> PartRequirement {
        PartRequirement {
            description: "Precision shaft with tight concentricity requirements".to_string(),
            material: "Aluminum 6061-T6".to_string(),
            industry: Some("aerospace".to_string()),
            dimensions: Dimensions {
                x: 150.0,
                y: 50.0,
                z: 50.0,
            },
            required_operations: [Operation::Turning].into_iter().collect(),
            annual_volume: 10_000,
            target_tolerance: 0.005,
            tolerances: vec![
                ToleranceSpec {
                    feature: "diameter".to_string(),
                    tolerance: 0.005,
                    unit: "mm".to_string(),
                },
                ToleranceSpec {
                    feature: "length".to_string(),
                    tolerance: 0.1,
                    unit: "mm".to_string(),
                },
            ],
        }
    }

    #[test]
    fn tight_tolerance_gets_cmm_and_spc() {
        let assembler = assembler_over(InMemoryCorpus::seeded());
        let (plan, degradations) = assembler.assemble(&requirement());

        assert!(degradations.is_empty());
        let diameter = plan
            .inspection_points
            .iter()
            .find(|p| p.feature == "diameter")
            .unwrap();
        assert_eq!(diameter.method, InspectionMethod::Cmm);

        let length = plan
            .inspection_points
            .iter()
            .find(|p| p.feature == "length")
            .unwrap();
        assert_eq!(length.method, InspectionMethod::ManualGauge);

        assert!(plan
            .control_methods
            .contains(&ControlMethod::StatisticalProcessControl));
    }

    #[test]
    fn acceptance_criteria_mirror_tolerances() {
        let assembler = assembler_over(InMemoryCorpus::seeded());
        let (plan, _) = assembler.assemble(&requirement());
        assert_eq!(plan.acceptance_criteria.len(), 2);
        assert_eq!(plan.acceptance_criteria[0], "diameter: \u{b1}0.005mm");
        assert_eq!(plan.acceptance_criteria[1], "length: \u{b1}0.1mm");
    }

    #[test]
    fn aerospace_standards_mandate_fai_and_traceability() {
        let assembler = assembler_over(InMemoryCorpus::seeded());
        let (plan, _) = assembler.assemble(&requirement());

        let ids: Vec<&str> = plan
            .relevant_standards
            .iter()
            .map(|r| r.standard.id.as_str())
            .collect();
        assert!(ids.contains(&"AS9100D"));
        assert!(plan
            .control_methods
            .contains(&ControlMethod::FirstArticleInspection));
        assert!(plan.control_methods.contains(&ControlMethod::FullTraceability));
    }

    #[test]
    fn empty_corpus_still_yields_a_plan() {
        let assembler = assembler_over(InMemoryCorpus::new(vec![]));
        let (plan, degradations) = assembler.assemble(&requirement());

        assert!(plan.relevant_standards.is_empty());
        assert!(!plan.inspection_points.is_empty());
        assert!(degradations.is_empty());
        // No regulated standards retrieved, so no FAI mandate
        assert!(!plan
            .control_methods
            .contains(&ControlMethod::FirstArticleInspection));
    }

    #[test]
    fn assembly_is_reproducible() {
        let assembler = assembler_over(InMemoryCorpus::seeded());
        let (a, _) = assembler.assemble(&requirement());
        let (b, _) = assembler.assemble(&requirement());

        let ids_a: Vec<&str> = a.relevant_standards.iter().map(|r| r.standard.id.as_str()).collect();
        let ids_b: Vec<&str> = b.relevant_standards.iter().map(|r| r.standard.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(a.ai_recommendations, b.ai_recommendations);
        assert_eq!(a.control_methods, b.control_methods);
    }
}
