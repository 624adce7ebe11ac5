//! Generation-swapped corpus embedding store.
//!
//! Corpus embeddings are computed once per generation and cached keyed by
//! document id. A rebuild (first load or explicit retrain) computes the
//! whole generation off-lock under a single-writer guard, then publishes
//! it atomically. Readers always see a consistent generation; retrieval
//! during a retrain serves the previous generation until the swap.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::{info, warn};

use crate::model::Embedding;
use crate::provider::EmbeddingProvider;

/// An immutable, fully-built set of corpus embeddings.
#[derive(Debug)]
pub struct EmbeddingGeneration {
    /// Monotonic generation counter; 0 is the empty pre-build generation
    pub generation: u64,
    /// Strategy identifier the embeddings were computed with
    pub strategy_id: String,
    embeddings: HashMap<String, Embedding>,
}

impl EmbeddingGeneration {
    fn empty() -> Self {
        Self {
            generation: 0,
            strategy_id: String::new(),
            embeddings: HashMap::new(),
        }
    }

    /// Cached embedding for a document id.
    pub fn get(&self, doc_id: &str) -> Option<&Embedding> {
        self.embeddings.get(doc_id)
    }

    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }
}

/// Outcome of a generation rebuild.
#[derive(Debug, Clone, Default)]
pub struct RebuildStats {
    pub documents_processed: usize,
    /// Document ids that degraded to a zero vector
    pub degraded: Vec<String>,
}

/// Copy-on-write store for the active embedding generation.
pub struct EmbeddingStore {
    active: RwLock<Arc<EmbeddingGeneration>>,
    /// Single-writer guard: concurrent rebuilds serialize here instead of
    /// racing on the swap
    build_lock: Mutex<()>,
}

impl EmbeddingStore {
    pub fn new() -> Self {
        Self {
            active: RwLock::new(Arc::new(EmbeddingGeneration::empty())),
            build_lock: Mutex::new(()),
        }
    }

    /// The active generation. Cheap; clones an `Arc`.
    pub fn current(&self) -> Arc<EmbeddingGeneration> {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Build and publish a new generation from the given documents.
    ///
    /// `documents` pairs each document id with its embedding text. A
    /// document whose embedding fails is kept with a zero vector and
    /// reported in the stats, never excluded from the corpus.
    pub fn rebuild(
        &self,
        provider: &EmbeddingProvider,
        documents: &[(String, String)],
    ) -> RebuildStats {
        let _writer = self
            .build_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let dimension = provider.dimension();
        let mut embeddings = HashMap::with_capacity(documents.len());
        let mut stats = RebuildStats::default();

        for (doc_id, text) in documents {
            let embedding = match provider.embed(text) {
                Ok(embedding) => embedding,
                Err(e) => {
                    warn!(doc = %doc_id, error = %e, "embedding failed, degrading to zero vector");
                    stats.degraded.push(doc_id.clone());
                    Embedding::zero(dimension)
                }
            };
            embeddings.insert(doc_id.clone(), embedding);
            stats.documents_processed += 1;
        }

        let next_generation = self.current().generation + 1;
        let generation = Arc::new(EmbeddingGeneration {
            generation: next_generation,
            strategy_id: provider.strategy_id().to_string(),
            embeddings,
        });

        {
            let mut guard = self
                .active
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = generation;
        }

        info!(
            generation = next_generation,
            documents = stats.documents_processed,
            degraded = stats.degraded.len(),
            "published embedding generation"
        );
        stats
    }
}

impl Default for EmbeddingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quality_types::EmbeddingSettings;

    fn provider(corpus: &[(String, String)]) -> EmbeddingProvider {
        let texts: Vec<String> = corpus.iter().map(|(_, t)| t.clone()).collect();
        let settings = EmbeddingSettings {
            neural_enabled: false,
            dimension: 32,
            ..EmbeddingSettings::default()
        };
        EmbeddingProvider::fallback(&settings, &texts)
    }

    fn corpus() -> Vec<(String, String)> {
        vec![
            ("iso-9001".to_string(), "quality management".to_string()),
            ("as9100d".to_string(), "aerospace quality".to_string()),
        ]
    }

    #[test]
    fn starts_empty_at_generation_zero() {
        let store = EmbeddingStore::new();
        let gen = store.current();
        assert_eq!(gen.generation, 0);
        assert!(gen.is_empty());
    }

    #[test]
    fn rebuild_publishes_next_generation() {
        let store = EmbeddingStore::new();
        let docs = corpus();
        let stats = store.rebuild(&provider(&docs), &docs);

        assert_eq!(stats.documents_processed, 2);
        assert!(stats.degraded.is_empty());

        let gen = store.current();
        assert_eq!(gen.generation, 1);
        assert_eq!(gen.len(), 2);
        assert_eq!(gen.strategy_id, "tfidf-32");
        assert!(gen.get("iso-9001").is_some());
    }

    #[test]
    fn readers_keep_previous_generation_across_rebuild() {
        let store = EmbeddingStore::new();
        let docs = corpus();
        let p = provider(&docs);

        store.rebuild(&p, &docs);
        let held = store.current();
        assert_eq!(held.generation, 1);

        store.rebuild(&p, &docs);
        // A held Arc still sees generation 1; new readers see generation 2
        assert_eq!(held.generation, 1);
        assert_eq!(store.current().generation, 2);
    }

    #[test]
    fn rebuild_with_same_strategy_is_reproducible() {
        let store = EmbeddingStore::new();
        let docs = corpus();
        let p = provider(&docs);

        store.rebuild(&p, &docs);
        let first = store.current();
        store.rebuild(&p, &docs);
        let second = store.current();

        for (id, _) in &docs {
            assert_eq!(first.get(id), second.get(id));
        }
    }
}
