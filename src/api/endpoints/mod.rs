//! Endpoint handlers, one module per resource.
//!
//! Every handler follows the same shape: decode the payload, run the
//! reconciler against the document store, wrap the result in the uniform
//! envelope. The shared plumbing lives here and the per-resource
//! modules stay thin.

pub mod appointments;
pub mod contacts;
pub mod emergency;
pub mod frequencies;
pub mod medications;
pub mod notifications;
pub mod settings;
pub mod users;

use serde::Deserialize;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::models::Resource;
use crate::reconcile::UpsertOutcome;
use crate::store::Fields;

/// `?user_id=` scope for the batch upsert endpoints.
#[derive(Deserialize)]
pub struct UserScope {
    pub user_id: String,
}

/// List response: the raw field maps as `data`, plus an explanatory
/// message when the scope is empty (still `code: 0`).
pub(crate) fn list_envelope(collection: &str, records: Vec<Fields>) -> Envelope {
    let empty = records.is_empty();
    let data = Value::Array(records.into_iter().map(Value::Object).collect());
    let mut envelope = Envelope::data(data);
    if empty {
        envelope.message = Some(format!("No {collection} found"));
    }
    envelope
}

/// Single-entity upsert: `code: 0` on update, `code: 1` with the
/// "not found, so it was added" message on the insert branch.
/// `include_document_id` mirrors which endpoints return the new
/// document's id on that branch.
pub(crate) async fn upsert_one<R: Resource>(
    ctx: &ApiContext,
    item: &R,
    include_document_id: bool,
) -> Result<Envelope, ApiError> {
    match ctx.reconciler.upsert(item.user_id(), item).await? {
        UpsertOutcome::Updated => Ok(Envelope::message(
            0,
            format!("{} updated successfully!", R::LABEL),
        )),
        UpsertOutcome::Created(doc) => {
            let envelope =
                Envelope::message(1, format!("{} not found, so it was added.", R::LABEL));
            Ok(if include_document_id {
                envelope.with_document_id(doc.id())
            } else {
                envelope
            })
        }
    }
}

/// Batch upsert under the caller-supplied user id; fail-fast per item.
pub(crate) async fn upsert_batch<R: Resource>(
    ctx: &ApiContext,
    user_id: &str,
    items: &[R],
    plural: &str,
) -> Result<Envelope, ApiError> {
    ctx.reconciler.upsert_all(user_id, items).await?;
    Ok(Envelope::message(0, format!("{plural} updated successfully!")))
}
