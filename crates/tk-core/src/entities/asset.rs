use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An asset of a project, unique by code within (project, asset type).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Asset {
    pub id: i64,
    pub project_id: i64,
    pub asset_type_id: i64,
    pub code: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
