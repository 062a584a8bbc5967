use serde::{Deserialize, Serialize};

use super::Resource;

/// Per-user app preferences. One document per user, keyed by `user_id`
/// alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub user_id: String,
    pub push: String,
    pub theme: String,
    pub font: String,
}

impl Resource for Setting {
    const COLLECTION: &'static str = "settings";
    const LABEL: &'static str = "Setting";

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn logical_id(&self) -> Option<i64> {
        None
    }
}
