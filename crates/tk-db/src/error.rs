//! Database error types for tk-db.

use thiserror::Error;
use tk_core::enums::EntityKind;
use tk_core::errors::CoreError;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A code or value failed validation before anything was written.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A lookup key did not resolve.
    #[error("{kind} '{key}' not found{}", .scope.as_ref().map(|s| format!(" in {s}")).unwrap_or_default())]
    NotFound {
        kind: EntityKind,
        key: String,
        scope: Option<String>,
    },

    /// A strict create collided with an existing row.
    #[error("{kind} '{key}' already exists{}", .scope.as_ref().map(|s| format!(" in {s}")).unwrap_or_default())]
    AlreadyExists {
        kind: EntityKind,
        key: String,
        scope: Option<String>,
    },

    /// Required configuration is missing from a project's metadata.
    #[error("project '{project}' has no '{key}' configured")]
    MissingConfiguration { project: String, key: String },

    /// A unique constraint (or another writer's lock) rejected a write.
    /// Retryable when the rejected value was derived (e.g. a publish version).
    #[error("{kind} write rejected by unique constraint: {detail}")]
    Constraint { kind: EntityKind, detail: String },

    /// A write kept conflicting after every retry.
    #[error("{kind} {detail} still conflicting after {attempts} attempts")]
    ConstraintViolation {
        kind: EntityKind,
        detail: String,
        attempts: u32,
    },

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether the error is a unique-constraint rejection worth retrying.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Constraint { .. })
    }

    pub(crate) fn not_found(kind: EntityKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
            scope: None,
        }
    }
}
