//! Model file caching.
//!
//! Downloads the neural model files from HuggingFace Hub once and serves
//! them from a local cache directory afterwards, so the engine works
//! offline after the first load.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::EmbeddingError;

/// Files the neural strategy needs on disk.
pub const MODEL_FILES: &[&str] = &["config.json", "tokenizer.json", "model.safetensors"];

/// Local cache for neural model files.
#[derive(Debug, Clone)]
pub struct ModelFileCache {
    pub cache_dir: PathBuf,
    /// HuggingFace repository id
    pub repo_id: String,
}

impl ModelFileCache {
    pub fn new(cache_dir: impl Into<PathBuf>, repo_id: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            repo_id: repo_id.into(),
        }
    }

    /// Cache under the user cache dir, namespaced per repository.
    pub fn for_repo(repo_id: impl Into<String>) -> Self {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("quality-engine")
            .join("models");
        Self::new(cache_dir, repo_id)
    }

    fn model_dir(&self) -> PathBuf {
        self.cache_dir.join(self.repo_id.replace('/', "_"))
    }

    /// Whether every required file is present locally.
    pub fn is_cached(&self) -> bool {
        let dir = self.model_dir();
        MODEL_FILES.iter().all(|f| dir.join(f).exists())
    }

    /// Ensure model files exist locally, downloading when missing.
    pub fn ensure(&self) -> Result<ModelPaths, EmbeddingError> {
        let dir = self.model_dir();

        if self.is_cached() {
            debug!(path = ?dir, "using cached model files");
        } else {
            info!(repo = %self.repo_id, "downloading model files");
            self.download()?;
        }

        Ok(ModelPaths {
            config: dir.join("config.json"),
            tokenizer: dir.join("tokenizer.json"),
            weights: dir.join("model.safetensors"),
        })
    }

    fn download(&self) -> Result<(), EmbeddingError> {
        use hf_hub::api::sync::Api;

        let api = Api::new().map_err(|e| EmbeddingError::Download(e.to_string()))?;
        let repo = api.model(self.repo_id.clone());

        std::fs::create_dir_all(self.model_dir())?;

        for filename in MODEL_FILES {
            let source = repo
                .get(filename)
                .map_err(|e| EmbeddingError::Download(format!("{filename}: {e}")))?;
            let dest = self.model_dir().join(filename);
            std::fs::copy(&source, &dest)?;
            debug!(file = filename, "cached model file");
        }

        Ok(())
    }
}

/// Resolved paths to the three model files.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}
