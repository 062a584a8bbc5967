//! Notification endpoints (no delete).
//!
//! The "update" endpoints insert unconditionally; that is what the
//! mobile client relies on today. Flagged with product for confirmation,
//! reproduced as-is until then.

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::models::{Notification, Resource};

use super::{list_envelope, UserScope};

pub async fn list(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    let records = ctx
        .reconciler
        .list(Notification::COLLECTION, &user_id)
        .await?;
    Ok(Json(list_envelope(Notification::COLLECTION, records)))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Json(notification): Json<Notification>,
) -> Result<Json<Envelope>, ApiError> {
    let doc = ctx.reconciler.insert(&notification).await?;
    Ok(Json(Envelope::created(doc.id())))
}

pub async fn update_list(
    State(ctx): State<ApiContext>,
    Query(_scope): Query<UserScope>,
    Json(notifications): Json<Vec<Notification>>,
) -> Result<Json<Envelope>, ApiError> {
    for notification in &notifications {
        ctx.reconciler.insert(notification).await?;
    }
    Ok(Json(Envelope::message(
        0,
        "Notifications updated successfully!",
    )))
}
