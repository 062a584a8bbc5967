use serde::{Deserialize, Serialize};

use super::Resource;

/// Dosage schedule for one medication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frequency {
    pub id: i64,
    pub medication_id: i64,
    pub user_id: String,
    pub dosage: i64,
    pub dosage_unit: i64,
    pub cycle: i64,
    /// Times of day, in the order the app displays them.
    pub times: Vec<String>,
}

impl Resource for Frequency {
    const COLLECTION: &'static str = "frequencies";
    const LABEL: &'static str = "Frequency";

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn logical_id(&self) -> Option<i64> {
        Some(self.id)
    }
}
