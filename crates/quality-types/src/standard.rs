//! Quality-standard documents and retrieval results.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Category of a quality standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StandardCategory {
    QualityManagement,
    Dimensional,
    Tolerancing,
    Automotive,
    Medical,
    Other,
}

/// A quality-standard document in the corpus.
///
/// Documents are created at corpus load time and immutable thereafter.
/// The corpus embedding for a document lives in the embedding store keyed
/// by `id`, so the document itself stays cheap to clone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardDocument {
    /// Stable identifier (e.g., "AS9100D", "ISO-9001:2015")
    pub id: String,
    pub title: String,
    /// Issuing organization (e.g., "ISO", "SAE International")
    pub organization: String,
    pub category: StandardCategory,
    /// Full document text used for embedding
    pub full_text: String,
    /// Short summary shown in retrieval results
    pub summary: String,
    /// Key requirements, in document order
    pub key_requirements: Vec<String>,
    /// Industries the standard applies to (lowercase)
    pub industries: BTreeSet<String>,
    /// Manufacturing processes the standard covers (lowercase)
    pub applicable_processes: BTreeSet<String>,
}

impl StandardDocument {
    /// Combined text fed to the embedding model.
    ///
    /// Mirrors the corpus training input: title, id, category, summary and
    /// full text concatenated so that both the headline and the body
    /// contribute to similarity.
    pub fn embedding_text(&self) -> String {
        format!(
            "Title: {}\nStandard: {}\nCategory: {:?}\nSummary: {}\nFull Text: {}",
            self.title, self.id, self.category, self.summary, self.full_text
        )
    }

    /// Whether this standard applies to the given industry (case-insensitive).
    pub fn applies_to_industry(&self, industry: &str) -> bool {
        let needle = industry.trim().to_lowercase();
        self.industries.contains(&needle)
    }
}

/// A standard returned from similarity retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedStandard {
    pub standard: StandardDocument,
    /// Cosine similarity clamped to [0, 1]
    pub similarity: f32,
    /// 1-based rank within the result list
    pub rank: usize,
}
