//! `GET /`: list every account from the identity provider.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::directory::list_users;
use crate::models::User;

#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// Provider errors mid-listing are logged and yield partial results, so
/// this handler itself never fails.
pub async fn list(State(ctx): State<ApiContext>) -> Json<UsersResponse> {
    let users = list_users(ctx.directory.as_ref()).await;
    Json(UsersResponse { users })
}
