use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shared task taxonomy entry, e.g. `rig` / "Rig".
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskType {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl TaskType {
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.code } else { &self.name }
    }
}
