use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shared asset taxonomy entry, e.g. `chr` / "Character".
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssetType {
    pub id: i64,
    /// Three lowercase letters.
    pub code: String,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl AssetType {
    /// Name for display, falling back to the code.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.code } else { &self.name }
    }
}
