//! In-memory document store.
//!
//! Same contract and merge semantics as the Firestore adapter, backed by a
//! mutex-guarded collection map. Used as the injected fake in tests and as
//! the `store_backend=memory` option for running locally without
//! credentials.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{Document, DocumentRef, DocumentStore, Fields, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    serial: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Document>>> {
        // A poisoned lock means a panicked test thread; propagating the
        // inner state is still sound for a plain data map.
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Total documents in `collection` (test helper).
    pub fn count(&self, collection: &str) -> usize {
        self.guard().get(collection).map_or(0, Vec::len)
    }
}

fn matches(fields: &Fields, filters: &[(&str, Value)]) -> bool {
    filters
        .iter()
        .all(|(name, value)| fields.get(*name) == Some(value))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.guard();
        let mut hits: Vec<Document> = guard
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| matches(&d.fields, filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some(n) = limit {
            hits.truncate(n as usize);
        }
        Ok(hits)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<DocumentRef, StoreError> {
        let serial = self.serial.fetch_add(1, Ordering::Relaxed);
        let reference = DocumentRef(format!("{collection}/mem-{serial}"));
        self.guard().entry(collection.to_string()).or_default().push(Document {
            reference: reference.clone(),
            fields,
        });
        Ok(reference)
    }

    async fn update(&self, doc: &DocumentRef, fields: Fields) -> Result<(), StoreError> {
        let mut guard = self.guard();
        for docs in guard.values_mut() {
            if let Some(stored) = docs.iter_mut().find(|d| &d.reference == doc) {
                // Merge, not replace, matching Firestore's updateMask patch.
                for (name, value) in fields {
                    stored.fields.insert(name, value);
                }
                return Ok(());
            }
        }
        Err(StoreError::Decode(format!("unknown document reference {}", doc.0)))
    }

    async fn delete(&self, doc: &DocumentRef) -> Result<(), StoreError> {
        let mut guard = self.guard();
        for docs in guard.values_mut() {
            docs.retain(|d| &d.reference != doc);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().expect("object literal")
    }

    #[tokio::test]
    async fn find_ands_equality_filters() {
        let store = MemoryStore::new();
        store
            .insert("medications", fields(json!({"user_id": "u1", "id": 1})))
            .await
            .unwrap();
        store
            .insert("medications", fields(json!({"user_id": "u1", "id": 2})))
            .await
            .unwrap();
        store
            .insert("medications", fields(json!({"user_id": "u2", "id": 1})))
            .await
            .unwrap();

        let hits = store
            .find(
                "medications",
                &[("user_id", json!("u1")), ("id", json!(1))],
                None,
            )
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].fields["user_id"], json!("u1"));
    }

    #[tokio::test]
    async fn find_respects_limit() {
        let store = MemoryStore::new();
        for id in 0..5 {
            store
                .insert("notifications", fields(json!({"user_id": "u1", "id": id})))
                .await
                .unwrap();
        }
        let hits = store
            .find("notifications", &[("user_id", json!("u1"))], Some(1))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = MemoryStore::new();
        let doc = store
            .insert(
                "settings",
                fields(json!({"user_id": "u1", "theme": "dark", "font": "small"})),
            )
            .await
            .unwrap();

        store
            .update(&doc, fields(json!({"theme": "light"})))
            .await
            .unwrap();

        let hits = store
            .find("settings", &[("user_id", json!("u1"))], None)
            .await
            .unwrap();
        assert_eq!(hits[0].fields["theme"], json!("light"));
        // Untouched field survives the merge.
        assert_eq!(hits[0].fields["font"], json!("small"));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_document() {
        let store = MemoryStore::new();
        let doc = store
            .insert("appointments", fields(json!({"user_id": "u1", "id": 1})))
            .await
            .unwrap();
        store
            .insert("appointments", fields(json!({"user_id": "u1", "id": 2})))
            .await
            .unwrap();

        store.delete(&doc).await.unwrap();
        assert_eq!(store.count("appointments"), 1);
    }

    #[tokio::test]
    async fn update_unknown_reference_errors() {
        let store = MemoryStore::new();
        let err = store
            .update(&DocumentRef("medications/mem-99".into()), Fields::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown document reference"));
    }
}
