//! Appointment endpoints.
//!
//! The add/update split differs from the other resources only in verbs:
//! `POST /appointment` inserts, `PUT /appointment` upserts.

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::models::{Appointment, Resource};
use crate::reconcile::DeleteOutcome;

use super::{list_envelope, upsert_batch, upsert_one, UserScope};

pub async fn list(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    let records = ctx
        .reconciler
        .list(Appointment::COLLECTION, &user_id)
        .await?;
    Ok(Json(list_envelope(Appointment::COLLECTION, records)))
}

pub async fn add(
    State(ctx): State<ApiContext>,
    Json(appointment): Json<Appointment>,
) -> Result<Json<Envelope>, ApiError> {
    let doc = ctx.reconciler.insert(&appointment).await?;
    Ok(Json(Envelope::created(doc.id())))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Json(appointment): Json<Appointment>,
) -> Result<Json<Envelope>, ApiError> {
    Ok(Json(upsert_one(&ctx, &appointment, false).await?))
}

pub async fn update_list(
    State(ctx): State<ApiContext>,
    Query(scope): Query<UserScope>,
    Json(appointments): Json<Vec<Appointment>>,
) -> Result<Json<Envelope>, ApiError> {
    Ok(Json(
        upsert_batch(&ctx, &scope.user_id, &appointments, "Appointments").await?,
    ))
}

pub async fn remove(
    State(ctx): State<ApiContext>,
    Path((user_id, appointment_id)): Path<(String, i64)>,
) -> Result<Json<Envelope>, ApiError> {
    match ctx
        .reconciler
        .delete(Appointment::COLLECTION, &user_id, appointment_id)
        .await?
    {
        DeleteOutcome::Deleted => Ok(Json(Envelope::message(
            0,
            "Appointment deleted successfully!",
        ))),
        DeleteOutcome::NotFound => Err(ApiError::NotFound("Appointment not found".into())),
    }
}
