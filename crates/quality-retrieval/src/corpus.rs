//! Standard corpus store contract.

use quality_types::StandardDocument;

/// Read access to the quality-standard corpus.
///
/// Pure data access; retrieval logic lives in [`crate::StandardsRetriever`].
pub trait StandardCorpus: Send + Sync {
    /// Every document in the corpus.
    fn list_all(&self) -> Vec<StandardDocument>;

    /// Look up a single document by id.
    fn get_by_id(&self, id: &str) -> Option<StandardDocument>;
}

/// In-memory corpus backed by a vector of documents.
pub struct InMemoryCorpus {
    documents: Vec<StandardDocument>,
}

impl InMemoryCorpus {
    pub fn new(documents: Vec<StandardDocument>) -> Self {
        Self { documents }
    }

    /// Corpus seeded with the built-in standards.
    pub fn seeded() -> Self {
        Self::new(crate::seed::seed_standards())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl StandardCorpus for InMemoryCorpus {
    fn list_all(&self) -> Vec<StandardDocument> {
        self.documents.clone()
    }

    fn get_by_id(&self, id: &str) -> Option<StandardDocument> {
        self.documents.iter().find(|d| d.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_corpus_has_known_standards() {
        let corpus = InMemoryCorpus::seeded();
        assert!(corpus.len() >= 6);
        assert!(corpus.get_by_id("AS9100D").is_some());
        assert!(corpus.get_by_id("ISO-9001:2015").is_some());
        assert!(corpus.get_by_id("NO-SUCH-STANDARD").is_none());
    }

    #[test]
    fn empty_corpus_lists_nothing() {
        let corpus = InMemoryCorpus::new(vec![]);
        assert!(corpus.is_empty());
        assert!(corpus.list_all().is_empty());
    }
}
