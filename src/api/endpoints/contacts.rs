//! Emergency contact endpoints.
//!
//! Deletion is batch-only: the client sends a comma-separated id string,
//! missing ids are tolerated silently, and the call fails only when none
//! of the requested ids existed.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::models::{EmergencyContact, Resource};

use super::{list_envelope, upsert_batch, upsert_one, UserScope};

pub async fn list(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    let records = ctx
        .reconciler
        .list(EmergencyContact::COLLECTION, &user_id)
        .await?;
    Ok(Json(list_envelope(EmergencyContact::COLLECTION, records)))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Json(contact): Json<EmergencyContact>,
) -> Result<Json<Envelope>, ApiError> {
    Ok(Json(upsert_one(&ctx, &contact, true).await?))
}

pub async fn update_list(
    State(ctx): State<ApiContext>,
    Query(scope): Query<UserScope>,
    Json(contacts): Json<Vec<EmergencyContact>>,
) -> Result<Json<Envelope>, ApiError> {
    Ok(Json(
        upsert_batch(&ctx, &scope.user_id, &contacts, "Emergency contacts").await?,
    ))
}

#[derive(Deserialize)]
pub struct ContactDeleteRequest {
    #[serde(rename = "contactList")]
    pub contact_list: String,
}

pub async fn remove_batch(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
    Json(request): Json<ContactDeleteRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let ids = parse_id_list(&request.contact_list)?;

    let deleted = ctx
        .reconciler
        .delete_many(EmergencyContact::COLLECTION, &user_id, &ids)
        .await?;

    if deleted == 0 {
        return Err(ApiError::NotFound(
            "No matching emergencies found to delete.".into(),
        ));
    }
    Ok(Json(Envelope::message(
        0,
        format!("{deleted} emergencies deleted successfully!"),
    )))
}

fn parse_id_list(raw: &str) -> Result<Vec<i64>, ApiError> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| ApiError::BadRequest(format!("invalid contact id {:?}", part.trim())))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_ids() {
        assert_eq!(parse_id_list("5,6,7").unwrap(), vec![5, 6, 7]);
    }

    #[test]
    fn tolerates_whitespace_around_ids() {
        assert_eq!(parse_id_list(" 1, 2 ").unwrap(), vec![1, 2]);
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(parse_id_list("1,abc").is_err());
    }
}
