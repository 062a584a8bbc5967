use serde::{Deserialize, Serialize};

/// Internal shape for an identity-provider account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
}
