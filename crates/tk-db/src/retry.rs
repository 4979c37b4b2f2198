//! Bounded retry for unique-constraint conflicts.
//!
//! Publish version assignment reads `MAX(version)` and inserts `max + 1`.
//! The unit runs in an `IMMEDIATE` transaction, so a second writer on the same
//! file waits for the first one's lock and reads the committed maximum. A
//! writer that still loses, either to the `UNIQUE (task_id, code,
//! publish_type_id, release, version)` constraint or to a lock held past the
//! busy timeout, re-runs the whole unit of work with exponential backoff
//! until it succeeds or the budget is spent.
//!
//! Only [`DatabaseError::Constraint`] is retried; lock contention is mapped
//! onto it with [`lock_contention_as_conflict`]. Validation, missing
//! configuration and lookup failures surface on the first attempt.

use std::future::Future;
use std::time::Duration;

use tk_config::PublishConfig;
use tk_core::enums::EntityKind;

use crate::error::DatabaseError;

/// Configuration for retry behavior on constraint conflicts.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(200),
        }
    }
}

impl From<&PublishConfig> for RetryConfig {
    fn from(config: &PublishConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
        }
    }
}

/// Detect a unique-constraint rejection from SQLite.
///
/// The predicate is intentionally narrow: foreign-key and CHECK failures
/// are genuine errors and must not be retried.
pub fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}

/// Detect SQLite lock contention (`SQLITE_BUSY` / `SQLITE_LOCKED`).
pub fn is_lock_contention(e: &libsql::Error) -> bool {
    let message = e.to_string();
    message.contains("database is locked")
        || message.contains("database table is locked")
        || message.contains("SQLITE_BUSY")
}

/// Turn a lock-contention failure into a retryable conflict on `kind`.
/// Every other error passes through unchanged.
#[must_use]
pub fn lock_contention_as_conflict(kind: EntityKind, err: DatabaseError) -> DatabaseError {
    match err {
        DatabaseError::LibSql(e) if is_lock_contention(&e) => DatabaseError::Constraint {
            kind,
            detail: e.to_string(),
        },
        other => other,
    }
}

/// Run `op` until it succeeds, fails with a non-conflict error, or the
/// attempt budget is exhausted.
///
/// `op` receives the 1-based attempt number.
///
/// # Errors
///
/// Returns the first non-conflict error unchanged, or
/// `DatabaseError::ConstraintViolation` once every attempt conflicted.
pub async fn retry_conflicts<T, F, Fut>(config: &RetryConfig, mut op: F) -> Result<T, DatabaseError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, DatabaseError>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut delay = config.base_delay;
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(DatabaseError::Constraint { kind, detail }) => {
                if attempt >= max_attempts {
                    return Err(DatabaseError::ConstraintViolation {
                        kind,
                        detail,
                        attempts: attempt,
                    });
                }
                tracing::warn!(
                    %kind,
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    %detail,
                    "unique constraint conflict, retrying"
                );
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, config.max_delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn instant(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    fn conflict() -> DatabaseError {
        DatabaseError::Constraint {
            kind: EntityKind::Publish,
            detail: "UNIQUE constraint failed: publishes.version".into(),
        }
    }

    #[tokio::test]
    async fn succeeds_after_conflicts() {
        let result = retry_conflicts(&instant(3), |attempt| async move {
            if attempt < 3 { Err(conflict()) } else { Ok(attempt) }
        })
        .await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn exhausted_budget_reports_attempts() {
        let calls = AtomicU32::new(0);
        let err = retry_conflicts(&instant(3), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(conflict()) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(
            err,
            DatabaseError::ConstraintViolation {
                kind: EntityKind::Publish,
                attempts: 3,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn non_conflict_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let err = retry_conflicts(&instant(3), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err::<(), _>(DatabaseError::MissingConfiguration {
                    project: "PRJ1".into(),
                    key: "environment.root_path".into(),
                })
            }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err, DatabaseError::MissingConfiguration { .. }));
    }

    #[tokio::test]
    async fn zero_budget_still_runs_once() {
        let calls = AtomicU32::new(0);
        let _ = retry_conflicts(&instant(0), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(conflict()) }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn lock_contention_becomes_a_conflict() {
        let locked = DatabaseError::LibSql(libsql::Error::SqliteFailure(
            5,
            "database is locked".into(),
        ));
        let mapped = lock_contention_as_conflict(EntityKind::Publish, locked);
        assert!(mapped.is_conflict(), "unexpected error: {mapped}");

        let other = DatabaseError::LibSql(libsql::Error::SqliteFailure(
            19,
            "FOREIGN KEY constraint failed".into(),
        ));
        let passed = lock_contention_as_conflict(EntityKind::Publish, other);
        assert!(matches!(passed, DatabaseError::LibSql(_)));
    }

    #[tokio::test]
    async fn lock_contention_is_retried() {
        let result = retry_conflicts(&instant(3), |attempt| async move {
            if attempt == 1 {
                let locked = DatabaseError::LibSql(libsql::Error::SqliteFailure(
                    5,
                    "database is locked".into(),
                ));
                Err(lock_contention_as_conflict(EntityKind::Publish, locked))
            } else {
                Ok(attempt)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 2);
    }

    #[test]
    fn config_from_publish_section() {
        let config = RetryConfig::from(&PublishConfig::default());
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.base_delay, Duration::from_millis(10));
        assert_eq!(config.max_delay, Duration::from_millis(200));
    }
}
