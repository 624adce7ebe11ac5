//! Layered configuration for the quality engine.
//!
//! Layering: built-in defaults -> config file -> environment variables.
//! Config file lives at `~/.config/quality-engine/config.toml`; environment
//! variables use the `QUALITY_ENGINE_` prefix with `__` as separator
//! (e.g., `QUALITY_ENGINE_RETRIEVAL__TOP_K=10`).

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Embedding provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// HuggingFace repository for the neural model
    #[serde(default = "default_model_repo")]
    pub model_repo: String,

    /// Override for the model file cache directory
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Fixed embedding dimension shared by both strategies
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Maximum time to wait for the neural model to load before failing
    /// over to the statistical fallback
    #[serde(default = "default_load_timeout")]
    pub load_timeout_secs: u64,

    /// When false, skip the neural strategy entirely and use the fallback.
    /// Useful for offline deployments and deterministic tests.
    #[serde(default = "default_true")]
    pub neural_enabled: bool,
}

fn default_model_repo() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

fn default_dimension() -> usize {
    384
}

fn default_load_timeout() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model_repo: default_model_repo(),
            cache_dir: None,
            dimension: default_dimension(),
            load_timeout_secs: default_load_timeout(),
            neural_enabled: true,
        }
    }
}

/// Standards retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalSettings {
    /// Default number of standards to return
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Similarity difference below which two scores count as tied
    #[serde(default = "default_epsilon")]
    pub similarity_epsilon: f32,
}

fn default_top_k() -> usize {
    5
}

fn default_epsilon() -> f32 {
    1e-6
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            similarity_epsilon: default_epsilon(),
        }
    }
}

/// Equipment scoring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    /// Envelope slack ratio beyond which extra capacity earns no reward
    #[serde(default = "default_size_saturation")]
    pub size_saturation: f64,

    /// Tolerance ratio (target / capability) at which the score plateaus
    #[serde(default = "default_tolerance_plateau")]
    pub tolerance_plateau: f64,

    /// Annual volume below which manual machines fit best
    #[serde(default = "default_low_volume_max")]
    pub low_volume_max: u32,

    /// Annual volume above which full automation fits best
    #[serde(default = "default_high_volume_min")]
    pub high_volume_min: u32,

    /// Maximum number of recommendations returned
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_size_saturation() -> f64 {
    2.0
}

fn default_tolerance_plateau() -> f64 {
    4.0
}

fn default_low_volume_max() -> u32 {
    1_000
}

fn default_high_volume_min() -> u32 {
    5_000
}

fn default_max_results() -> usize {
    5
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            size_saturation: default_size_saturation(),
            tolerance_plateau: default_tolerance_plateau(),
            low_volume_max: default_low_volume_max(),
            high_volume_min: default_high_volume_min(),
            max_results: default_max_results(),
        }
    }
}

/// Plan assembly settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSettings {
    /// Tolerances below this magnitude require CMM-grade inspection
    #[serde(default = "default_tight_tolerance")]
    pub tight_tolerance_threshold: f64,
}

fn default_tight_tolerance() -> f64 {
    0.01
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            tight_tolerance_threshold: default_tight_tolerance(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub retrieval: RetrievalSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub plan: PlanSettings,
}

impl EngineConfig {
    /// Load configuration with layering: defaults -> file -> env vars.
    pub fn load() -> Result<Self, EngineError> {
        let mut builder = Config::builder();

        if let Some(path) = Self::config_file_path() {
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings = builder
            .add_source(Environment::with_prefix("QUALITY_ENGINE").separator("__"))
            .build()
            .map_err(|e| EngineError::Config(e.to_string()))?;

        let config: EngineConfig = settings
            .try_deserialize()
            .map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Default config file location.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "quality-engine")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.embedding.dimension == 0 {
            return Err(EngineError::Config(
                "embedding.dimension must be > 0".to_string(),
            ));
        }
        if self.embedding.load_timeout_secs == 0 {
            return Err(EngineError::Config(
                "embedding.load_timeout_secs must be > 0".to_string(),
            ));
        }
        if self.retrieval.top_k == 0 {
            return Err(EngineError::Config("retrieval.top_k must be > 0".to_string()));
        }
        if self.retrieval.similarity_epsilon < 0.0 {
            return Err(EngineError::Config(
                "retrieval.similarity_epsilon must be non-negative".to_string(),
            ));
        }
        if self.scoring.size_saturation <= 1.0 {
            return Err(EngineError::Config(
                "scoring.size_saturation must be > 1.0".to_string(),
            ));
        }
        if self.scoring.tolerance_plateau <= 1.0 {
            return Err(EngineError::Config(
                "scoring.tolerance_plateau must be > 1.0".to_string(),
            ));
        }
        if self.scoring.low_volume_max >= self.scoring.high_volume_min {
            return Err(EngineError::Config(
                "scoring.low_volume_max must be below high_volume_min".to_string(),
            ));
        }
        if self.plan.tight_tolerance_threshold <= 0.0 {
            return Err(EngineError::Config(
                "plan.tight_tolerance_threshold must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.embedding.dimension, 384);
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.scoring.max_results, 5);
        assert!((config.plan.tight_tolerance_threshold - 0.01).abs() < 1e-12);
    }

    #[test]
    fn zero_dimension_rejected() {
        let mut config = EngineConfig::default();
        config.embedding.dimension = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_volume_bands_rejected() {
        let mut config = EngineConfig::default();
        config.scoring.low_volume_max = 10_000;
        config.scoring.high_volume_min = 5_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = EngineConfig::default();
        let toml = toml_like_json(&config);
        let back: EngineConfig = serde_json::from_str(&toml).unwrap();
        assert_eq!(back.embedding.model_repo, config.embedding.model_repo);
    }

    fn toml_like_json(config: &EngineConfig) -> String {
        serde_json::to_string(config).unwrap()
    }
}
