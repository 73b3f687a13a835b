//! Document stores: id → text lookup plus corpus size.

pub mod download;
pub mod sqlite;

pub use download::resolve_database;
pub use sqlite::SqliteDocumentStore;

use crate::error::{Result, SweepError};
use std::collections::HashMap;

/// Opaque document identifier returned by rankers
pub type DocumentId = String;

/// Read access to the corpus the ranker retrieves from.
pub trait DocumentStore {
    /// Total number of documents; upper bound of the depth sweep.
    fn doc_count(&self) -> Result<usize>;

    /// Text content of a document. Unknown ids are `DocumentNotFound`.
    fn get_content(&self, id: &str) -> Result<String>;

    /// Every document id, in a stable order.
    fn doc_ids(&self) -> Result<Vec<DocumentId>>;
}

/// In-memory store keeping insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryDocumentStore {
    ids: Vec<DocumentId>,
    texts: HashMap<DocumentId, String>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document. Replacing keeps the original position.
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        let id = id.into();
        if self.texts.insert(id.clone(), text.into()).is_none() {
            self.ids.push(id);
        }
    }

    pub fn from_documents<I, K, V>(docs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut store = Self::new();
        for (id, text) in docs {
            store.insert(id, text);
        }
        store
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn doc_count(&self) -> Result<usize> {
        Ok(self.ids.len())
    }

    fn get_content(&self, id: &str) -> Result<String> {
        self.texts
            .get(id)
            .cloned()
            .ok_or_else(|| SweepError::DocumentNotFound(id.to_string()))
    }

    fn doc_ids(&self) -> Result<Vec<DocumentId>> {
        Ok(self.ids.clone())
    }
}
