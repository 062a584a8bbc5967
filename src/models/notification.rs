use serde::{Deserialize, Serialize};

use super::Resource;

/// In-app notification record. The three `var` slots are opaque payload
/// strings the mobile client formats per `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: String,
    #[serde(rename = "type")]
    pub notification_type: i64,
    pub var1: String,
    pub var2: String,
    pub var3: String,
    pub status: i64,
    pub target_id: i64,
}

impl Resource for Notification {
    const COLLECTION: &'static str = "notifications";
    const LABEL: &'static str = "Notification";

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn logical_id(&self) -> Option<i64> {
        Some(self.id)
    }
}
