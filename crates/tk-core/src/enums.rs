//! Entity kinds, code kinds, and release channels.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the value stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Kind of entity tracked by the store. Used to label errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    AssetType,
    TaskType,
    PublishType,
    Asset,
    Task,
    Publish,
}

impl EntityKind {
    pub const ALL: [Self; 7] = [
        Self::Project,
        Self::AssetType,
        Self::TaskType,
        Self::PublishType,
        Self::Asset,
        Self::Task,
        Self::Publish,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::AssetType => "asset_type",
            Self::TaskType => "task_type",
            Self::PublishType => "publish_type",
            Self::Asset => "asset",
            Self::Task => "task",
            Self::Publish => "publish",
        }
    }

    /// Human-readable label, e.g. `"asset type"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::AssetType => "asset type",
            Self::TaskType => "task type",
            Self::PublishType => "publish type",
            Self::Asset => "asset",
            Self::Task => "task",
            Self::Publish => "publish",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| CoreError::InvalidValue {
                field: "entity kind".into(),
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// CodeKind
// ---------------------------------------------------------------------------

/// Lexical category of a human-readable code. Each kind has its own grammar
/// (see [`crate::grammar`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CodeKind {
    Project,
    AssetType,
    Asset,
    TaskType,
    PublishType,
    PublishCode,
    FileDescription,
}

impl CodeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::AssetType => "asset type",
            Self::Asset => "asset",
            Self::TaskType => "task type",
            Self::PublishType => "publish type",
            Self::PublishCode => "publish",
            Self::FileDescription => "file description",
        }
    }

    /// Short description of the expected form, used in error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Project => "uppercase letters and digits, starting with a letter",
            Self::AssetType => "exactly three lowercase letters",
            Self::Asset => "lower_snake_case with at least two words",
            Self::TaskType | Self::PublishType => "lower_snake_case",
            Self::PublishCode => "lowerCamelCase",
            Self::FileDescription => "lowercase letters only",
        }
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Release
// ---------------------------------------------------------------------------

/// Release channel of a publish. Scopes version numbering and shapes the path.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Release {
    /// In-progress artifact.
    #[default]
    Work,
    /// Finalized artifact.
    Release,
}

impl Release {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Release => "release",
        }
    }

    /// First character of the channel name, used as the version prefix.
    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            Self::Work => 'w',
            Self::Release => 'r',
        }
    }

    /// Version label such as `w001` or `r012`.
    #[must_use]
    pub fn version_label(self, version: i64) -> String {
        format!("{}{version:03}", self.initial())
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Release {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "release" => Ok(Self::Release),
            other => Err(CoreError::InvalidValue {
                field: "release".into(),
                value: other.to_string(),
            }),
        }
    }
}
