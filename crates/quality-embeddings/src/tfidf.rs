//! TF-IDF fallback embedding strategy.
//!
//! Fit once over the full corpus at load time. The vocabulary is capped at
//! the configured dimension so fallback vectors are the same fixed length
//! as neural ones, keeping downstream similarity math strategy-agnostic.
//! Fully deterministic: vocabulary selection orders by document frequency
//! descending, then term ascending.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::EmbeddingError;
use crate::model::{Embedding, EmbeddingModel, ModelInfo};

/// English stop words excluded from the vocabulary.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "in", "is",
    "it", "its", "of", "on", "or", "that", "the", "this", "to", "was", "were", "which", "will",
    "with",
];

/// Statistical term-weighting vectorizer.
pub struct TfIdfEmbedder {
    /// Term -> vector index
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per vector index
    idf: Vec<f32>,
    info: ModelInfo,
}

impl TfIdfEmbedder {
    /// Fit the vectorizer over the corpus.
    ///
    /// `dimension` caps the vocabulary; corpora with fewer distinct terms
    /// leave trailing vector components at zero.
    pub fn fit(corpus: &[String], dimension: usize) -> Self {
        let n_docs = corpus.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for text in corpus {
            let mut seen: Vec<String> = terms_of(text);
            seen.sort();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Most frequent terms first; term order breaks ties so the
        // vocabulary is identical on every fit over the same corpus.
        let mut ranked: Vec<(String, usize)> = doc_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(dimension);

        let mut vocabulary = BTreeMap::new();
        let mut idf = vec![0.0; dimension];
        for (index, (term, df)) in ranked.into_iter().enumerate() {
            // Smoothed idf, never zero so every vocabulary term contributes
            idf[index] = (((1 + n_docs) as f32) / ((1 + df) as f32)).ln() + 1.0;
            vocabulary.insert(term, index);
        }

        debug!(
            terms = vocabulary.len(),
            docs = n_docs,
            dimension,
            "fit tf-idf vocabulary"
        );

        Self {
            vocabulary,
            idf,
            info: ModelInfo {
                name: format!("tfidf-{dimension}"),
                dimension,
                max_sequence_length: 0,
            },
        }
    }

    /// Number of terms actually in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

impl EmbeddingModel for TfIdfEmbedder {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let mut values = vec![0.0f32; self.info.dimension];
        for term in terms_of(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                values[index] += self.idf[index];
            }
        }
        // All-unknown text degrades to the zero vector rather than erroring
        Ok(Embedding::new(values))
    }
}

/// Unigrams and bigrams of the lowercased text, stop words removed.
fn terms_of(text: &str) -> Vec<String> {
    let tokens: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 1 && !STOP_WORDS.contains(t))
        .map(|t| t.to_string())
        .collect();

    let mut terms = Vec::with_capacity(tokens.len() * 2);
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms.extend(tokens);
    terms
}
