//! Code grammar.
//!
//! Every human-readable code is checked against a fixed, anchored pattern for
//! its [`CodeKind`] before anything is written. The grammar keeps synthesized
//! publish paths collision-safe and predictable.
//!
//! | Kind | Pattern | Example |
//! |---|---|---|
//! | project | `[A-Z][A-Z0-9]*` | `PRJ1` |
//! | asset type | `[a-z]{3}` | `chr` |
//! | asset | `[a-z]+(?:_[a-z0-9]+)+` | `hero_knight` |
//! | task type | `[a-z]+(?:_[a-z]+)*` | `anim_block` |
//! | publish type | `[a-z]+(?:_[a-z]+)*` | `geo_cache` |
//! | publish | `[a-z]+(?:[A-Z][a-z0-9]*)*` | `hiResCache` |
//! | file description | `[a-z]+` | `abc` |
//!
//! File extensions are not codes but end up in the same file names, so they
//! get an anchored pattern of their own (`\.[a-z0-9]+`, e.g. `.abc`).

use std::sync::OnceLock;

use regex::Regex;

use crate::enums::CodeKind;
use crate::errors::CoreError;

const PROJECT_CODE: &str = r"[A-Z][A-Z0-9]*";
const ASSET_TYPE_CODE: &str = r"[a-z]{3}";
const ASSET_CODE: &str = r"[a-z]+(?:_[a-z0-9]+)+";
const SNAKE_CODE: &str = r"[a-z]+(?:_[a-z]+)*";
const PUBLISH_CODE: &str = r"[a-z]+(?:[A-Z][a-z0-9]*)*";
const FILE_DESCRIPTION: &str = r"[a-z]+";
const EXTENSION: &str = r"^\.[a-z0-9]+$";

const fn pattern(kind: CodeKind) -> &'static str {
    match kind {
        CodeKind::Project => PROJECT_CODE,
        CodeKind::AssetType => ASSET_TYPE_CODE,
        CodeKind::Asset => ASSET_CODE,
        CodeKind::TaskType | CodeKind::PublishType => SNAKE_CODE,
        CodeKind::PublishCode => PUBLISH_CODE,
        CodeKind::FileDescription => FILE_DESCRIPTION,
    }
}

fn anchored(kind: CodeKind) -> &'static Regex {
    static PROJECT: OnceLock<Regex> = OnceLock::new();
    static ASSET_TYPE: OnceLock<Regex> = OnceLock::new();
    static ASSET: OnceLock<Regex> = OnceLock::new();
    static SNAKE: OnceLock<Regex> = OnceLock::new();
    static PUBLISH: OnceLock<Regex> = OnceLock::new();
    static FILE_DESC: OnceLock<Regex> = OnceLock::new();

    let cell = match kind {
        CodeKind::Project => &PROJECT,
        CodeKind::AssetType => &ASSET_TYPE,
        CodeKind::Asset => &ASSET,
        CodeKind::TaskType | CodeKind::PublishType => &SNAKE,
        CodeKind::PublishCode => &PUBLISH,
        CodeKind::FileDescription => &FILE_DESC,
    };
    cell.get_or_init(|| {
        Regex::new(&format!("^(?:{})$", pattern(kind))).expect("code grammar regex must compile")
    })
}

fn project_root_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"/(?P<project_code>{PROJECT_CODE})/?$"))
            .expect("project root regex must compile")
    })
}

fn extension_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EXTENSION).expect("extension regex must compile"))
}

/// Check whether `code` is legal for `kind`.
#[must_use]
pub fn validate(kind: CodeKind, code: &str) -> bool {
    anchored(kind).is_match(code)
}

/// Like [`validate`], but returns an error naming the offending code.
///
/// # Errors
///
/// Returns `CoreError::InvalidCode` if `code` does not match the grammar.
pub fn ensure(kind: CodeKind, code: &str) -> Result<(), CoreError> {
    if validate(kind, code) {
        Ok(())
    } else {
        Err(CoreError::InvalidCode {
            kind,
            code: code.to_string(),
        })
    }
}

/// Normalise a file extension to carry its leading dot and check it.
///
/// `abc` and `.abc` both yield `.abc`.
///
/// # Errors
///
/// Returns `CoreError::InvalidValue` for an empty extension or one with
/// anything besides lowercase letters and digits after the dot.
pub fn normalize_extension(extension: &str) -> Result<String, CoreError> {
    let normalized = if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    };
    if extension_re().is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(CoreError::InvalidValue {
            field: "extension".into(),
            value: extension.to_string(),
        })
    }
}

/// Extract the project code a root path ends with, e.g. `/prod/PRJ1` -> `PRJ1`.
#[must_use]
pub fn project_code_from_root(path: &str) -> Option<&str> {
    project_root_re()
        .captures(path)
        .and_then(|caps| caps.name("project_code"))
        .map(|m| m.as_str())
}
