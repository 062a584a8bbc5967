//! Per-user settings. One document per user, keyed by `user_id` alone;
//! there is no delete.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::models::{Resource, Setting};

use super::{list_envelope, upsert_one};

pub async fn get(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    let records = ctx.reconciler.list(Setting::COLLECTION, &user_id).await?;
    Ok(Json(list_envelope(Setting::COLLECTION, records)))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Json(setting): Json<Setting>,
) -> Result<Json<Envelope>, ApiError> {
    Ok(Json(upsert_one(&ctx, &setting, true).await?))
}
