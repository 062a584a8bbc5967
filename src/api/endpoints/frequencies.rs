//! Dosage frequency endpoints, under `/medication/frequency/*`.

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::models::{Frequency, Resource};
use crate::reconcile::DeleteOutcome;

use super::{list_envelope, upsert_batch, upsert_one, UserScope};

pub async fn list(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    let records = ctx.reconciler.list(Frequency::COLLECTION, &user_id).await?;
    Ok(Json(list_envelope(Frequency::COLLECTION, records)))
}

pub async fn add(
    State(ctx): State<ApiContext>,
    Json(frequency): Json<Frequency>,
) -> Result<Json<Envelope>, ApiError> {
    let doc = ctx.reconciler.insert(&frequency).await?;
    Ok(Json(Envelope::created(doc.id())))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Json(frequency): Json<Frequency>,
) -> Result<Json<Envelope>, ApiError> {
    Ok(Json(upsert_one(&ctx, &frequency, false).await?))
}

pub async fn update_list(
    State(ctx): State<ApiContext>,
    Query(scope): Query<UserScope>,
    Json(frequencies): Json<Vec<Frequency>>,
) -> Result<Json<Envelope>, ApiError> {
    Ok(Json(
        upsert_batch(&ctx, &scope.user_id, &frequencies, "Frequencies").await?,
    ))
}

pub async fn remove(
    State(ctx): State<ApiContext>,
    Path((user_id, frequency_id)): Path<(String, i64)>,
) -> Result<Json<Envelope>, ApiError> {
    match ctx
        .reconciler
        .delete(Frequency::COLLECTION, &user_id, frequency_id)
        .await?
    {
        DeleteOutcome::Deleted => Ok(Json(Envelope::message(
            0,
            "Frequency deleted successfully!",
        ))),
        DeleteOutcome::NotFound => Err(ApiError::NotFound("Frequency not found".into())),
    }
}
