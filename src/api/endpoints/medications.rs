//! Medication endpoints.
//!
//! - `GET /medication/:user_id` lists
//! - `PUT /medication/add` inserts unconditionally
//! - `PUT /medication/update` upserts by `(user_id, id)`
//! - `PUT /medication/update/list?user_id=` upserts a batch sequentially
//! - `DELETE /medication/:user_id/:medication_id`

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::models::{Medication, Resource};
use crate::reconcile::DeleteOutcome;

use super::{list_envelope, upsert_batch, upsert_one, UserScope};

pub async fn list(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    let records = ctx.reconciler.list(Medication::COLLECTION, &user_id).await?;
    Ok(Json(list_envelope(Medication::COLLECTION, records)))
}

pub async fn add(
    State(ctx): State<ApiContext>,
    Json(medication): Json<Medication>,
) -> Result<Json<Envelope>, ApiError> {
    let doc = ctx.reconciler.insert(&medication).await?;
    Ok(Json(Envelope::created(doc.id())))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Json(medication): Json<Medication>,
) -> Result<Json<Envelope>, ApiError> {
    Ok(Json(upsert_one(&ctx, &medication, false).await?))
}

pub async fn update_list(
    State(ctx): State<ApiContext>,
    Query(scope): Query<UserScope>,
    Json(medications): Json<Vec<Medication>>,
) -> Result<Json<Envelope>, ApiError> {
    Ok(Json(
        upsert_batch(&ctx, &scope.user_id, &medications, "Medications").await?,
    ))
}

pub async fn remove(
    State(ctx): State<ApiContext>,
    Path((user_id, medication_id)): Path<(String, i64)>,
) -> Result<Json<Envelope>, ApiError> {
    match ctx
        .reconciler
        .delete(Medication::COLLECTION, &user_id, medication_id)
        .await?
    {
        DeleteOutcome::Deleted => Ok(Json(Envelope::message(
            0,
            "Medication deleted successfully!",
        ))),
        DeleteOutcome::NotFound => Err(ApiError::NotFound("Medication not found".into())),
    }
}
