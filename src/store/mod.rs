//! Document store adapter.
//!
//! A minimal interface over a keyed-document collection: equality-filtered
//! queries, inserts, field-level merge updates, and deletes by document
//! reference. The production backend is Firestore's REST API
//! ([`FirestoreStore`]); [`MemoryStore`] implements the same contract
//! in-process for tests and credential-free local runs.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Flat field map of one document, in plain JSON values.
pub type Fields = Map<String, Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed store response: {0}")]
    Decode(String),

    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Opaque handle to one stored document (the store's native name/path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef(pub String);

impl DocumentRef {
    /// The store-native document id, the last path segment of the
    /// reference.
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

/// One document as returned by a query.
#[derive(Debug, Clone)]
pub struct Document {
    pub reference: DocumentRef,
    pub fields: Fields,
}

/// Keyed-document collection contract. All calls are remote round-trips
/// and may fail with a generic [`StoreError`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Query `collection` for documents matching every `(field, value)`
    /// equality predicate (filters are ANDed). `limit: None` returns all
    /// matches in the store's default order.
    async fn find(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError>;

    async fn insert(&self, collection: &str, fields: Fields) -> Result<DocumentRef, StoreError>;

    /// Field-level merge: fields absent from `fields` are left untouched
    /// on the stored document.
    async fn update(&self, doc: &DocumentRef, fields: Fields) -> Result<(), StoreError>;

    async fn delete(&self, doc: &DocumentRef) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_ref_id_is_last_segment() {
        let r = DocumentRef(
            "projects/p/databases/(default)/documents/medications/aB3xYz".into(),
        );
        assert_eq!(r.id(), "aB3xYz");
    }

    #[test]
    fn document_ref_id_of_bare_string() {
        let r = DocumentRef("plain".into());
        assert_eq!(r.id(), "plain");
    }
}
