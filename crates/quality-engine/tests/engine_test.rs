//! End-to-end engine scenarios over the seeded corpus and catalog.
//!
//! The fallback embedding strategy is forced so every test runs offline
//! and deterministically.

use std::collections::BTreeSet;
use std::sync::Arc;

use quality_engine::{InMemoryCatalog, InMemoryCorpus, QualityEngine};
use quality_types::{
    AutomationLevel, Dimensions, EngineConfig, EngineError, MachineCategory, MachineRecord,
    Operation, PartRequirement, ToleranceSpec, WorkEnvelope,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .try_init();
}

fn offline_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.embedding.neural_enabled = false;
    config
}

async fn seeded_engine() -> QualityEngine {
    init_tracing();
    QualityEngine::bootstrap(
        offline_config(),
        Arc::new(InMemoryCorpus::seeded()),
        Arc::new(InMemoryCatalog::seeded()),
    )
    .await
    .unwrap()
}

async fn engine_with_catalog(machines: Vec<MachineRecord>) -> QualityEngine {
    init_tracing();
    QualityEngine::bootstrap(
        offline_config(),
        Arc::new(InMemoryCorpus::seeded()),
        Arc::new(InMemoryCatalog::new(machines)),
    )
    .await
    .unwrap()
}

fn shaft_requirement() -> PartRequirement {
    PartRequirement {
        description: "Precision shaft with tight concentricity requirements".to_string(),
        material: "Aluminum 6061-T6".to_string(),
        industry: Some("aerospace".to_string()),
        dimensions: Dimensions {
            x: 150.0,
            y: 50.0,
            z: 50.0,
        },
        required_operations: [Operation::Turning, Operation::Drilling]
            .into_iter()
            .collect(),
        annual_volume: 10_000,
        target_tolerance: 0.005,
        tolerances: vec![
            ToleranceSpec {
                feature: "diameter".to_string(),
                tolerance: 0.005,
                unit: "mm".to_string(),
            },
            ToleranceSpec {
                feature: "concentricity".to_string(),
                tolerance: 0.01,
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

fn basic_machine(id: &str) -> MachineRecord {
    MachineRecord {
        id: id.to_string(),
        name: id.to_string(),
        manufacturer: "Acme".to_string(),
        category: MachineCategory::Lathe,
        price: 200_000.0,
        work_envelope: WorkEnvelope {
            x: 500.0,
            y: 300.0,
            z: 300.0,
        },
        tolerance_capability: 0.005,
        automation_level: AutomationLevel::SemiAuto,
        supported_operations: [Operation::Turning, Operation::Drilling]
            .into_iter()
            .collect(),
        cycle_time_factor: 1.0,
        material_compatibility: ["aluminum"].iter().map(|s| s.to_string()).collect(),
    }
}

#[tokio::test]
async fn plan_includes_standards_inspection_and_insights() {
    let engine = seeded_engine().await;
    let response = engine.generate_plan(&shaft_requirement()).unwrap();

    assert!(!response.degraded);
    let plan = &response.plan;

    // Aerospace filter: AS9100D and ISO 9001 eligible, IATF excluded
    let ids: Vec<&str> = plan
        .relevant_standards
        .iter()
        .map(|r| r.standard.id.as_str())
        .collect();
    assert!(ids.contains(&"AS9100D"));
    assert!(ids.contains(&"ISO-9001:2015"));
    assert!(!ids.contains(&"IATF-16949:2016"));

    // Similarities non-increasing, ranks 1-based
    for pair in plan.relevant_standards.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
    for (i, retrieved) in plan.relevant_standards.iter().enumerate() {
        assert_eq!(retrieved.rank, i + 1);
    }

    assert_eq!(plan.inspection_points.len(), 3);
    assert_eq!(plan.acceptance_criteria.len(), 3);
    assert!(!plan.ai_recommendations.is_empty());
}

#[tokio::test]
async fn industry_filter_is_respected_end_to_end() {
    let engine = seeded_engine().await;
    let mut requirement = shaft_requirement();
    requirement.industry = Some("automotive".to_string());

    let response = engine.generate_plan(&requirement).unwrap();
    for retrieved in &response.plan.relevant_standards {
        assert!(retrieved.standard.applies_to_industry("automotive"));
    }
}

#[tokio::test]
async fn tightest_tolerance_selects_the_only_capable_machine() {
    let engine = seeded_engine().await;
    let mut requirement = shaft_requirement();
    requirement.target_tolerance = 0.003;
    requirement.required_operations = [Operation::Turning].into_iter().collect();

    let response = engine.recommend_machines(&requirement).unwrap();
    assert!(!response.degraded);
    assert_eq!(response.machines.len(), 1);
    assert_eq!(response.machines[0].machine.id, "dmg-mori-nlx-2500");
}

#[tokio::test]
async fn high_volume_prefers_the_automated_machine() {
    let manual = {
        let mut m = basic_machine("manual-lathe");
        m.automation_level = AutomationLevel::Manual;
        m
    };
    let automated = {
        let mut m = basic_machine("auto-lathe");
        m.automation_level = AutomationLevel::FullAuto;
        m
    };
    let engine = engine_with_catalog(vec![manual, automated]).await;

    let mut requirement = shaft_requirement();
    requirement.annual_volume = 50_000;

    let response = engine.recommend_machines(&requirement).unwrap();
    assert_eq!(response.machines[0].machine.id, "auto-lathe");
    assert!(response.machines[0].score > response.machines[1].score);
}

#[tokio::test]
async fn identical_machines_order_by_id() {
    let engine = engine_with_catalog(vec![basic_machine("zeta"), basic_machine("alpha")]).await;
    let response = engine.recommend_machines(&shaft_requirement()).unwrap();

    assert_eq!(response.machines.len(), 2);
    assert_eq!(response.machines[0].machine.id, "alpha");
    assert_eq!(response.machines[1].machine.id, "zeta");
    assert_eq!(response.machines[0].score, response.machines[1].score);
}

#[tokio::test]
async fn empty_catalog_yields_clean_empty_response() {
    let engine = engine_with_catalog(vec![]).await;
    let response = engine.recommend_machines(&shaft_requirement()).unwrap();

    assert!(response.machines.is_empty());
    assert!(!response.degraded);
    assert!(response.note.unwrap().contains("no equipment available"));
}

#[tokio::test]
async fn infeasible_requirement_yields_noted_empty_response() {
    let engine = seeded_engine().await;
    let mut requirement = shaft_requirement();
    requirement.dimensions = Dimensions {
        x: 5_000.0,
        y: 5_000.0,
        z: 5_000.0,
    };

    let response = engine.recommend_machines(&requirement).unwrap();
    assert!(response.machines.is_empty());
    assert!(!response.degraded);
    assert!(response.note.unwrap().contains("no feasible equipment"));
}

#[tokio::test]
async fn invalid_requirement_is_rejected() {
    let engine = seeded_engine().await;
    let mut requirement = shaft_requirement();
    requirement.annual_volume = 0;

    let err = engine.generate_plan(&requirement).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn recommendations_are_deterministic() {
    let engine = seeded_engine().await;
    let requirement = shaft_requirement();

    let first = engine.recommend_machines(&requirement).unwrap();
    let second = engine.recommend_machines(&requirement).unwrap();

    let ids_first: Vec<&str> = first.machines.iter().map(|m| m.machine.id.as_str()).collect();
    let ids_second: Vec<&str> = second.machines.iter().map(|m| m.machine.id.as_str()).collect();
    assert_eq!(ids_first, ids_second);
    for (a, b) in first.machines.iter().zip(second.machines.iter()) {
        assert_eq!(a.score, b.score);
        assert_eq!(a.reasons, b.reasons);
    }
}

#[tokio::test]
async fn retrain_reproduces_identical_rankings() {
    let engine = seeded_engine().await;
    let requirement = shaft_requirement();

    let before = engine.generate_plan(&requirement).unwrap();
    let report = engine.retrain_embeddings().await.unwrap();
    let after = engine.generate_plan(&requirement).unwrap();

    assert_eq!(report.documents_processed, 6);
    assert_eq!(report.strategy_used, "tfidf-384");
    assert_eq!(engine.strategy_id(), "tfidf-384");

    let ids_before: Vec<&str> = before
        .plan
        .relevant_standards
        .iter()
        .map(|r| r.standard.id.as_str())
        .collect();
    let ids_after: Vec<&str> = after
        .plan
        .relevant_standards
        .iter()
        .map(|r| r.standard.id.as_str())
        .collect();
    assert_eq!(ids_before, ids_after);

    for (a, b) in before
        .plan
        .relevant_standards
        .iter()
        .zip(after.plan.relevant_standards.iter())
    {
        assert!((a.similarity - b.similarity).abs() < 1e-6);
    }
}

#[tokio::test]
async fn capability_gaps_surface_in_reasons() {
    let engine = seeded_engine().await;
    let mut requirement = shaft_requirement();
    requirement.required_operations = [Operation::Turning, Operation::Grinding]
        .into_iter()
        .collect::<BTreeSet<_>>();

    let response = engine.recommend_machines(&requirement).unwrap();
    assert!(!response.machines.is_empty());
    for scored in &response.machines {
        assert!(scored.capability_match < 1.0);
        assert!(scored
            .reasons
            .iter()
            .any(|r| r.contains("missing required operation")));
    }
}

#[tokio::test]
async fn responses_serialize_with_lowercase_enums() {
    let engine = seeded_engine().await;
    let response = engine.generate_plan(&shaft_requirement()).unwrap();

    let json = serde_json::to_value(&response).unwrap();
    let methods = json["plan"]["control_methods"].as_array().unwrap();
    assert!(methods
        .iter()
        .any(|m| m == "statistical-process-control" || m == "final-inspection"));
}
