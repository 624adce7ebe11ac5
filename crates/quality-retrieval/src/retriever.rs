//! Semantic retrieval over the standards corpus.

use std::sync::Arc;

use tracing::{debug, warn};

use quality_embeddings::{Embedding, EmbeddingStore, SharedProvider};
use quality_types::{RetrievalSettings, RetrievedStandard};
use quality_vector::{CosineIndex, SimilarityIndex};

use crate::corpus::StandardCorpus;
use crate::error::RetrievalError;

/// Retrieves the standards most relevant to a free-text query.
pub struct StandardsRetriever {
    provider: Arc<SharedProvider>,
    store: Arc<EmbeddingStore>,
    corpus: Arc<dyn StandardCorpus>,
    settings: RetrievalSettings,
}

impl StandardsRetriever {
    pub fn new(
        provider: Arc<SharedProvider>,
        store: Arc<EmbeddingStore>,
        corpus: Arc<dyn StandardCorpus>,
        settings: RetrievalSettings,
    ) -> Self {
        Self {
            provider,
            store,
            corpus,
            settings,
        }
    }

    /// Top-K standards for the query, optionally restricted to an industry.
    ///
    /// The industry filter is applied before ranking. An empty corpus or an
    /// empty filter match yields an empty list, not an error.
    pub fn retrieve(
        &self,
        query: &str,
        industry_filter: Option<&str>,
        top_k: usize,
    ) -> Result<Vec<RetrievedStandard>, RetrievalError> {
        let mut candidates = self.corpus.list_all();
        if let Some(industry) = industry_filter {
            candidates.retain(|doc| doc.applies_to_industry(industry));
        }
        if candidates.is_empty() {
            debug!(industry = ?industry_filter, "no candidate standards");
            return Ok(vec![]);
        }

        let provider = self.provider.current();
        let generation = self.store.current();
        let query_embedding = provider.embed(query)?;

        // Per-request index over the eligible candidates; the corpus is
        // small enough that building it is cheaper than filtering ranks
        let mut index =
            CosineIndex::with_epsilon(provider.dimension(), self.settings.similarity_epsilon);
        for doc in &candidates {
            let embedding = match generation.get(&doc.id) {
                Some(embedding) => embedding.clone(),
                None => {
                    // Document arrived after the last rebuild; rank it at
                    // zero rather than dropping it
                    warn!(doc = %doc.id, "no cached embedding for document");
                    Embedding::zero(provider.dimension())
                }
            };
            index.add(&doc.id, &embedding)?;
        }

        let hits = index.search(&query_embedding, top_k);

        let results = hits
            .into_iter()
            .enumerate()
            .filter_map(|(i, hit)| {
                let standard = candidates.iter().find(|d| d.id == hit.id)?.clone();
                Some(RetrievedStandard {
                    standard,
                    similarity: hit.score,
                    rank: i + 1,
                })
            })
            .collect::<Vec<_>>();

        debug!(
            query_len = query.len(),
            industry = ?industry_filter,
            generation = generation.generation,
            results = results.len(),
            "retrieval complete"
        );
        Ok(results)
    }

    /// Retrieve with the configured default K.
    pub fn retrieve_default(
        &self,
        query: &str,
        industry_filter: Option<&str>,
    ) -> Result<Vec<RetrievedStandard>, RetrievalError> {
        self.retrieve(query, industry_filter, self.settings.top_k)
    }
}
