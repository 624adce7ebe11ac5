//! Embedding provider with neural-to-fallback failover.
//!
//! The strategy is chosen once at startup and changes only through an
//! explicit retrain, never silently per-request, so ranking determinism
//! stays auditable.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use quality_types::EmbeddingSettings;

use crate::error::EmbeddingError;
use crate::files::ModelFileCache;
use crate::model::{Embedding, EmbeddingModel};
use crate::neural::NeuralEmbedder;
use crate::tfidf::TfIdfEmbedder;

/// Which embedding strategy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Neural,
    Tfidf,
}

/// The active embedding strategy plus its identity.
pub struct EmbeddingProvider {
    model: Arc<dyn EmbeddingModel>,
    strategy: Strategy,
}

impl EmbeddingProvider {
    /// Initialize the provider: try the neural model (bounded by the
    /// configured timeout), fail over to TF-IDF fit on the corpus.
    ///
    /// Never fails: model unavailability is recovered locally and logged,
    /// not surfaced to the caller.
    pub async fn initialize(settings: &EmbeddingSettings, corpus_texts: &[String]) -> Self {
        if settings.neural_enabled {
            match load_neural(settings).await {
                Ok(embedder) => {
                    info!(strategy = "neural", "embedding provider ready");
                    return Self {
                        model: Arc::new(embedder),
                        strategy: Strategy::Neural,
                    };
                }
                Err(e) => {
                    warn!(error = %e, "neural model unavailable, using tf-idf fallback");
                }
            }
        }
        Self::fallback(settings, corpus_texts)
    }

    /// Build the TF-IDF fallback directly.
    pub fn fallback(settings: &EmbeddingSettings, corpus_texts: &[String]) -> Self {
        let embedder = TfIdfEmbedder::fit(corpus_texts, settings.dimension);
        info!(
            strategy = "tfidf",
            terms = embedder.vocabulary_size(),
            "embedding provider ready"
        );
        Self {
            model: Arc::new(embedder),
            strategy: Strategy::Tfidf,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Strategy identifier used as part of the embedding cache key.
    pub fn strategy_id(&self) -> &str {
        &self.model.info().name
    }

    pub fn dimension(&self) -> usize {
        self.model.info().dimension
    }

    pub fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        self.model.embed(text)
    }

    pub fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        self.model.embed_batch(texts)
    }
}

/// Load the neural model off the async runtime with a timeout.
///
/// The download/load path is the only network I/O in the core; it must
/// not block indefinitely.
async fn load_neural(settings: &EmbeddingSettings) -> Result<NeuralEmbedder, EmbeddingError> {
    let cache = match &settings.cache_dir {
        Some(dir) => ModelFileCache::new(dir.clone(), settings.model_repo.clone()),
        None => ModelFileCache::for_repo(settings.model_repo.clone()),
    };

    let timeout = Duration::from_secs(settings.load_timeout_secs);
    let task = tokio::task::spawn_blocking(move || NeuralEmbedder::load(&cache));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join)) => Err(EmbeddingError::ModelNotFound(format!(
            "model load task failed: {join}"
        ))),
        Err(_) => Err(EmbeddingError::LoadTimeout(settings.load_timeout_secs)),
    }
}

/// Swappable handle to the active provider.
///
/// Readers clone the inner `Arc`; retrain replaces it atomically so
/// in-flight requests finish on the strategy they started with.
pub struct SharedProvider {
    inner: RwLock<Arc<EmbeddingProvider>>,
}

impl SharedProvider {
    pub fn new(provider: EmbeddingProvider) -> Self {
        Self {
            inner: RwLock::new(Arc::new(provider)),
        }
    }

    /// The currently active provider.
    pub fn current(&self) -> Arc<EmbeddingProvider> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Publish a new provider (retrain path only).
    pub fn replace(&self, provider: EmbeddingProvider) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(provider);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EmbeddingSettings {
        EmbeddingSettings {
            neural_enabled: false,
            dimension: 64,
            ..EmbeddingSettings::default()
        }
    }

    fn corpus() -> Vec<String> {
        vec![
            "quality management".to_string(),
            "dimensional tolerancing".to_string(),
        ]
    }

    #[tokio::test]
    async fn disabled_neural_goes_straight_to_fallback() {
        let provider = EmbeddingProvider::initialize(&settings(), &corpus()).await;
        assert_eq!(provider.strategy(), Strategy::Tfidf);
        assert_eq!(provider.strategy_id(), "tfidf-64");
        assert_eq!(provider.dimension(), 64);
    }

    #[tokio::test]
    async fn unreachable_model_repo_fails_over() {
        let temp = tempfile::TempDir::new().unwrap();
        let settings = EmbeddingSettings {
            neural_enabled: true,
            model_repo: "nonexistent/no-such-model".to_string(),
            cache_dir: Some(temp.path().to_path_buf()),
            dimension: 32,
            load_timeout_secs: 5,
        };
        let provider = EmbeddingProvider::initialize(&settings, &corpus()).await;
        assert_eq!(provider.strategy(), Strategy::Tfidf);
    }

    #[test]
    fn shared_provider_swaps_atomically() {
        let shared = SharedProvider::new(EmbeddingProvider::fallback(&settings(), &corpus()));
        let before = shared.current();
        assert_eq!(before.strategy(), Strategy::Tfidf);

        // A reader holding the old Arc keeps it across a swap
        shared.replace(EmbeddingProvider::fallback(&settings(), &[]));
        assert_eq!(before.strategy_id(), "tfidf-64");
        assert_eq!(shared.current().strategy_id(), "tfidf-64");
    }
}
