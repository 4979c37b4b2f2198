use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Work on an asset for one task type. Identified by (asset, task type) alone.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub asset_id: i64,
    pub task_type_id: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
