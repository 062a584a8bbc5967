//! `POST /sendEmergency`: SMS fan-out to the user's emergency contacts.
//!
//! Partial failure is reported in the response body with `code: 1`, not
//! as an HTTP error; the `message` field carries a count, matching what
//! the mobile client displays.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::sms::{broadcast_emergency, SendFailure};

#[derive(Deserialize)]
pub struct EmergencyRequest {
    /// Phone numbers to alert, in send order.
    #[serde(rename = "emergencyData")]
    pub emergency_data: Vec<String>,
    /// Optional location strings; only the first is used.
    #[serde(rename = "currentAddress", default)]
    pub current_address: Vec<String>,
}

#[derive(Serialize)]
pub struct EmergencyResponse {
    pub code: u8,
    /// Sent count on success, failure count on partial failure.
    pub message: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<SendFailure>>,
}

pub async fn send(
    State(ctx): State<ApiContext>,
    Json(request): Json<EmergencyRequest>,
) -> Result<Json<EmergencyResponse>, ApiError> {
    let location = request.current_address.first().map(String::as_str);
    let report = broadcast_emergency(ctx.sms.as_ref(), &request.emergency_data, location).await;

    if report.failures.is_empty() {
        Ok(Json(EmergencyResponse {
            code: 0,
            message: report.total,
            details: None,
        }))
    } else {
        Ok(Json(EmergencyResponse {
            code: 1,
            message: report.failures.len(),
            details: Some(report.failures),
        }))
    }
}
