use serde::{Deserialize, Serialize};

use super::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub image: String,
    pub stock: i64,
    pub start_date: String,
    pub end_date: String,
    /// Low-stock threshold that triggers a refill alert.
    pub threshold: i64,
    pub push_alert: String,
    pub email_alert: String,
}

impl Resource for Medication {
    const COLLECTION: &'static str = "medications";
    const LABEL: &'static str = "Medication";

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn logical_id(&self) -> Option<i64> {
        Some(self.id)
    }
}
