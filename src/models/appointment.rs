use serde::{Deserialize, Serialize};

use super::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub phone: String,
    pub image: String,
    pub scheduled_time: String,
    pub description: String,
    pub location: String,
}

impl Resource for Appointment {
    const COLLECTION: &'static str = "appointments";
    const LABEL: &'static str = "Appointment";

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn logical_id(&self) -> Option<i64> {
        Some(self.id)
    }
}
