use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of file a publish produces, e.g. `geo_cache` written as `abc` / `.abc`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PublishType {
    pub id: i64,
    pub code: String,
    /// File description token embedded in publish file names.
    pub file_type: String,
    /// File extension including the leading dot.
    pub extension: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
