//! Engine wiring and the three public operations.

use std::sync::Arc;

use tracing::info;

use quality_embeddings::{EmbeddingProvider, EmbeddingStore, SharedProvider};
use quality_equipment::{EquipmentScorer, MachineCatalog};
use quality_plan::PlanAssembler;
use quality_retrieval::{StandardCorpus, StandardsRetriever};
use quality_types::{
    EngineConfig, EngineError, PartRequirement, PlanResponse, RecommendationResponse,
    RetrainReport,
};

/// The assembled engine. Thread-safe: all operations take `&self` and the
/// only mutable state (the embedding generation and active strategy) swaps
/// behind locks.
pub struct QualityEngine {
    config: EngineConfig,
    corpus: Arc<dyn StandardCorpus>,
    catalog: Arc<dyn MachineCatalog>,
    provider: Arc<SharedProvider>,
    store: Arc<EmbeddingStore>,
    assembler: PlanAssembler,
    scorer: EquipmentScorer,
}

impl QualityEngine {
    /// Build the engine: initialize the embedding strategy (neural with
    /// timeout, TF-IDF failover) and compute the first corpus embedding
    /// generation.
    pub async fn bootstrap(
        config: EngineConfig,
        corpus: Arc<dyn StandardCorpus>,
        catalog: Arc<dyn MachineCatalog>,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let documents = embedding_inputs(corpus.as_ref());
        let texts: Vec<String> = documents.iter().map(|(_, t)| t.clone()).collect();

        let provider = EmbeddingProvider::initialize(&config.embedding, &texts).await;
        let store = Arc::new(EmbeddingStore::new());
        let stats = store.rebuild(&provider, &documents);
        info!(
            strategy = provider.strategy_id(),
            documents = stats.documents_processed,
            "engine bootstrapped"
        );

        let provider = Arc::new(SharedProvider::new(provider));
        let retriever = Arc::new(StandardsRetriever::new(
            provider.clone(),
            store.clone(),
            corpus.clone(),
            config.retrieval.clone(),
        ));
        let assembler = PlanAssembler::new(retriever, config.plan.clone());
        let scorer = EquipmentScorer::new(config.scoring.clone());

        Ok(Self {
            config,
            corpus,
            catalog,
            provider,
            store,
            assembler,
            scorer,
        })
    }

    /// Generate a quality plan for the part.
    ///
    /// Never fails for subsystem reasons; retrieval failure produces a
    /// degraded plan. Only an invalid requirement is an error.
    pub fn generate_plan(&self, requirement: &PartRequirement) -> Result<PlanResponse, EngineError> {
        requirement.validate().map_err(EngineError::InvalidInput)?;
        let (plan, degradations) = self.assembler.assemble(requirement);
        Ok(PlanResponse::new(plan, degradations))
    }

    /// Rank catalog machines against the part requirement.
    ///
    /// An empty catalog or an all-infeasible candidate set yields an empty
    /// list with an explanatory note, not an error.
    pub fn recommend_machines(
        &self,
        requirement: &PartRequirement,
    ) -> Result<RecommendationResponse, EngineError> {
        requirement.validate().map_err(EngineError::InvalidInput)?;

        let machines = self.catalog.list_all();
        if machines.is_empty() {
            return Ok(RecommendationResponse::new(vec![], vec![])
                .with_note("no equipment available in the catalog"));
        }

        let ranked = self.scorer.rank(&machines, requirement);
        if ranked.is_empty() {
            return Ok(RecommendationResponse::new(vec![], vec![]).with_note(
                "no feasible equipment: every machine failed a size, tolerance or material floor",
            ));
        }
        Ok(RecommendationResponse::new(ranked, vec![]))
    }

    /// Rebuild the corpus embedding generation and re-select the strategy.
    ///
    /// The neural strategy is re-attempted even if a previous failure left
    /// the fallback active. In-flight retrievals keep serving the previous
    /// generation until the swap completes.
    pub async fn retrain_embeddings(&self) -> Result<RetrainReport, EngineError> {
        let documents = embedding_inputs(self.corpus.as_ref());
        let texts: Vec<String> = documents.iter().map(|(_, t)| t.clone()).collect();

        let provider = EmbeddingProvider::initialize(&self.config.embedding, &texts).await;
        let stats = self.store.rebuild(&provider, &documents);
        let strategy_used = provider.strategy_id().to_string();
        self.provider.replace(provider);

        info!(
            strategy = %strategy_used,
            documents = stats.documents_processed,
            degraded = stats.degraded.len(),
            "retrain complete"
        );
        Ok(RetrainReport {
            documents_processed: stats.documents_processed,
            strategy_used,
        })
    }

    /// The active embedding strategy identifier.
    pub fn strategy_id(&self) -> String {
        self.provider.current().strategy_id().to_string()
    }
}

/// (document id, embedding text) pairs for the whole corpus.
fn embedding_inputs(corpus: &dyn StandardCorpus) -> Vec<(String, String)> {
    corpus
        .list_all()
        .iter()
        .map(|doc| (doc.id.clone(), doc.embedding_text()))
        .collect()
}
