//! Resource reconciler: the upsert-by-query pattern every endpoint shares.
//!
//! One algorithm, parameterized per resource kind by collection name, key
//! filters, and payload shape: query with the logical key at limit 1, then
//! field-merge the first match or insert a new document. List reads,
//! deletes, and the tolerant batch delete live here too, so handlers stay
//! thin.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::models::Resource;
use crate::store::{DocumentRef, DocumentStore, Fields, StoreError};

/// Result of a single-entity upsert.
#[derive(Debug)]
pub enum UpsertOutcome {
    /// An existing document matched the key and was merged in place.
    Updated,
    /// No match; a new document was inserted.
    Created(DocumentRef),
}

/// Explicit found/not-found result for deletes, instead of
/// exception-as-control-flow.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

pub struct Reconciler {
    store: Arc<dyn DocumentStore>,
}

impl Reconciler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Upsert one resource under `user_id`'s scope.
    ///
    /// Known race: two concurrent upserts of the same logical key can both
    /// observe "no match" and both insert, leaving duplicate `(user_id,
    /// id)` records. The store exposes no compare-and-swap through this
    /// adapter, so the race is documented rather than resolved; later
    /// limit-1 lookups will silently see only one of the duplicates.
    pub async fn upsert<R: Resource>(
        &self,
        user_id: &str,
        item: &R,
    ) -> Result<UpsertOutcome, StoreError> {
        let key = key_filters(user_id, item.logical_id());
        self.upsert_fields(R::COLLECTION, &key, payload(item)?).await
    }

    /// Core upsert on raw fields: limit-1 key lookup, then merge or insert.
    pub async fn upsert_fields(
        &self,
        collection: &str,
        key: &[(&str, Value)],
        fields: Fields,
    ) -> Result<UpsertOutcome, StoreError> {
        let mut matches = self.store.find(collection, key, Some(1)).await?;
        match matches.pop() {
            Some(doc) => {
                self.store.update(&doc.reference, fields).await?;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                let reference = self.store.insert(collection, fields).await?;
                Ok(UpsertOutcome::Created(reference))
            }
        }
    }

    /// Upsert each item sequentially under `user_id`'s scope. A failure on
    /// item *k* abandons the rest; items already committed stay committed
    /// (no rollback, no partial-result reporting).
    pub async fn upsert_all<R: Resource>(
        &self,
        user_id: &str,
        items: &[R],
    ) -> Result<(), StoreError> {
        for item in items {
            self.upsert(user_id, item).await?;
        }
        Ok(())
    }

    /// Insert unconditionally, returning the new document's reference.
    pub async fn insert<R: Resource>(&self, item: &R) -> Result<DocumentRef, StoreError> {
        self.store.insert(R::COLLECTION, payload(item)?).await
    }

    /// Every document in `collection` owned by `user_id`, in store order.
    /// An empty scope is an empty list, not an error.
    pub async fn list(&self, collection: &str, user_id: &str) -> Result<Vec<Fields>, StoreError> {
        let docs = self
            .store
            .find(collection, &[("user_id", json!(user_id))], None)
            .await?;
        Ok(docs.into_iter().map(|d| d.fields).collect())
    }

    /// Delete the document at `(user_id, id)`, if any.
    pub async fn delete(
        &self,
        collection: &str,
        user_id: &str,
        id: i64,
    ) -> Result<DeleteOutcome, StoreError> {
        let key = key_filters(user_id, Some(id));
        let mut matches = self.store.find(collection, &key, Some(1)).await?;
        match matches.pop() {
            Some(doc) => {
                self.store.delete(&doc.reference).await?;
                Ok(DeleteOutcome::Deleted)
            }
            None => Ok(DeleteOutcome::NotFound),
        }
    }

    /// Delete each id independently, tolerating missing ones. Returns how
    /// many actually existed and were deleted, which may be fewer than
    /// requested.
    pub async fn delete_many(
        &self,
        collection: &str,
        user_id: &str,
        ids: &[i64],
    ) -> Result<usize, StoreError> {
        let mut deleted = 0;
        for &id in ids {
            if self.delete(collection, user_id, id).await? == DeleteOutcome::Deleted {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}

fn key_filters(user_id: &str, id: Option<i64>) -> Vec<(&'static str, Value)> {
    let mut filters = vec![("user_id", json!(user_id))];
    if let Some(id) = id {
        filters.push(("id", json!(id)));
    }
    filters
}

fn payload<R: Resource>(item: &R) -> Result<Fields, StoreError> {
    match serde_json::to_value(item)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Decode(format!(
            "resource serialized to non-object value: {other}"
        ))),
    }
}
