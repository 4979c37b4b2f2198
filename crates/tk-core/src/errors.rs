//! Cross-cutting error types for tk.
//!
//! Storage errors (`DatabaseError`) live in `tk-db`; configuration errors in
//! `tk-config`. The CLI converges everything into `anyhow`.

use thiserror::Error;

use crate::enums::CodeKind;

/// Errors that can be raised by any tk crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A code does not match the grammar of its kind.
    #[error("invalid {kind} code '{code}' (expected {})", .kind.describe())]
    InvalidCode { kind: CodeKind, code: String },

    /// A value could not be parsed into its typed form.
    #[error("invalid {field} '{value}'")]
    InvalidValue { field: String, value: String },
}
