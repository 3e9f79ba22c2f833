//! Where translation documents come from.
//!
//! Fetching a translation is the one suspension point of the core. The
//! [`CorpusSource`] trait abstracts it so the same session logic runs over
//! HTTP in a browser, the filesystem on desktop, or memory in tests.

use crate::error::CorpusLoadError;
use std::collections::HashMap;

/// Fetches the raw JSON document of a translation by id.
///
/// Implementations only move bytes; parsing and normalization happen in
/// [`Corpus::from_json_slice`](super::Corpus::from_json_slice).
#[async_trait::async_trait(?Send)]
pub trait CorpusSource {
    /// Returns the raw document bytes for `translation`.
    #[must_use = "Fetch failures should be handled"]
    async fn fetch(&self, translation: &str) -> Result<Vec<u8>, CorpusLoadError>;
}

/// Translation documents held in memory, keyed by translation id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpusSource {
    documents: HashMap<String, Vec<u8>>,
}

impl InMemoryCorpusSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the document for a translation.
    pub fn insert(&mut self, translation: impl Into<String>, document: impl Into<Vec<u8>>) {
        self.documents.insert(translation.into(), document.into());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, translation: impl Into<String>, document: impl Into<Vec<u8>>) -> Self {
        self.insert(translation, document);
        self
    }
}

#[async_trait::async_trait(?Send)]
impl CorpusSource for InMemoryCorpusSource {
    async fn fetch(&self, translation: &str) -> Result<Vec<u8>, CorpusLoadError> {
        self.documents
            .get(translation)
            .cloned()
            .ok_or_else(|| CorpusLoadError::Fetch {
                translation: translation.to_string(),
                message: "not found".to_string(),
            })
    }
}
