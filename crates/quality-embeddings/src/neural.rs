//! Neural embedding strategy.
//!
//! Runs all-MiniLM-L6-v2 locally through Candle. This is the primary
//! strategy; when it cannot load, the provider fails over to TF-IDF.

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::error::EmbeddingError;
use crate::files::{ModelFileCache, ModelPaths};
use crate::model::{Embedding, EmbeddingModel, ModelInfo};

/// Output dimension of all-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

/// Maximum input length in tokens; longer texts are truncated.
pub const MAX_SEQ_LENGTH: usize = 256;

/// Candle-backed sentence embedder.
pub struct NeuralEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    info: ModelInfo,
}

impl NeuralEmbedder {
    /// Load from a file cache, downloading model files if needed.
    pub fn load(cache: &ModelFileCache) -> Result<Self, EmbeddingError> {
        let paths = cache.ensure()?;
        Self::from_paths(&paths)
    }

    /// Load from already-resolved file paths.
    pub fn from_paths(paths: &ModelPaths) -> Result<Self, EmbeddingError> {
        info!("loading neural embedding model");

        // CPU inference; the corpus is small enough that GPU never pays off
        let device = Device::Cpu;

        let config_str = std::fs::read_to_string(&paths.config)?;
        let config: BertConfig = serde_json::from_str(&config_str)
            .map_err(|e| EmbeddingError::ModelNotFound(format!("invalid config: {e}")))?;

        let tokenizer = Tokenizer::from_file(&paths.tokenizer)
            .map_err(|e| EmbeddingError::Tokenizer(e.to_string()))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[paths.weights.clone()], DType::F32, &device)?
        };
        let model = BertModel::load(vb, &config)?;

        info!(dim = EMBEDDING_DIM, "neural model ready");

        Ok(Self {
            model,
            tokenizer,
            device,
            info: ModelInfo {
                name: "all-MiniLM-L6-v2".to_string(),
                dimension: EMBEDDING_DIM,
                max_sequence_length: MAX_SEQ_LENGTH,
            },
        })
    }

    /// Tokenize and pad a batch to a uniform length.
    fn tokenize_batch(
        &self,
        texts: &[&str],
    ) -> Result<(Tensor, Tensor), EmbeddingError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbeddingError::Tokenizer(e.to_string()))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0)
            .min(MAX_SEQ_LENGTH);

        let mut ids_flat: Vec<u32> = Vec::with_capacity(texts.len() * max_len);
        let mut mask_flat: Vec<u32> = Vec::with_capacity(texts.len() * max_len);

        for encoding in &encodings {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let take = ids.len().min(max_len);

            ids_flat.extend_from_slice(&ids[..take]);
            ids_flat.extend(std::iter::repeat(0).take(max_len - take));
            mask_flat.extend_from_slice(&mask[..take]);
            mask_flat.extend(std::iter::repeat(0).take(max_len - take));
        }

        let shape = (texts.len(), max_len);
        let input_ids = Tensor::from_vec(ids_flat, shape, &self.device)?;
        let attention_mask = Tensor::from_vec(mask_flat, shape, &self.device)?;
        Ok((input_ids, attention_mask))
    }

    /// Mean pooling over token embeddings, ignoring padding.
    fn mean_pool(&self, hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor, EmbeddingError> {
        let mask = attention_mask
            .unsqueeze(2)?
            .broadcast_as(hidden.shape())?
            .to_dtype(DType::F32)?;

        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.clamp(1e-9, f64::MAX)?;
        Ok(summed.broadcast_div(&counts)?)
    }
}

impl EmbeddingModel for NeuralEmbedder {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let mut batch = self.embed_batch(&[text])?;
        batch
            .pop()
            .ok_or_else(|| EmbeddingError::InvalidInput("empty batch result".to_string()))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        debug!(count = texts.len(), "embedding batch");

        let (input_ids, attention_mask) = self.tokenize_batch(texts)?;
        let token_type_ids = Tensor::zeros_like(&input_ids)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = self.mean_pool(&hidden, &attention_mask)?;

        let rows: Vec<Vec<f32>> = pooled.to_vec2()?;
        Ok(rows.into_iter().map(Embedding::new).collect())
    }
}
