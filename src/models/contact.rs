use serde::{Deserialize, Serialize};

use super::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub phone: String,
    pub image: String,
    #[serde(rename = "type")]
    pub contact_type: String,
}

impl Resource for EmergencyContact {
    const COLLECTION: &'static str = "emergencies";
    const LABEL: &'static str = "Emergency contact";

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn logical_id(&self) -> Option<i64> {
        Some(self.id)
    }
}
