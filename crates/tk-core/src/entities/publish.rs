use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Release;

/// A versioned output of a task.
///
/// ```text
/// absent → created (active = false) → active ⇄ inactive
/// ```
///
/// `version` and `path` are frozen once the row exists.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Publish {
    pub id: i64,
    pub task_id: i64,
    pub publish_type_id: i64,
    pub code: String,
    pub path: String,
    pub version: i64,
    pub release: Release,
    /// File size in bytes. Zero until the file is registered.
    pub size: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Publish {
    /// Version label such as `w001`.
    #[must_use]
    pub fn version_name(&self) -> String {
        self.release.version_label(self.version)
    }
}
