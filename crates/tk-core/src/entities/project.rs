use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Free-form project metadata, stored as a JSON object.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Reserved metadata key holding the project's environment map.
pub const ENVIRONMENT_KEY: &str = "environment";

/// Key inside the environment map holding the production root path.
pub const ROOT_PATH_KEY: &str = "root_path";

/// A production, identified globally by its uppercase code (e.g. `PRJ1`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Project {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub metadata: Metadata,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// The environment map stored under [`ENVIRONMENT_KEY`], if any.
    #[must_use]
    pub fn environment(&self) -> Option<&Metadata> {
        self.metadata.get(ENVIRONMENT_KEY)?.as_object()
    }

    /// Production root path from the environment map.
    #[must_use]
    pub fn root_path(&self) -> Option<&str> {
        self.environment()?
            .get(ROOT_PATH_KEY)?
            .as_str()
            .filter(|root| !root.is_empty())
    }
}
