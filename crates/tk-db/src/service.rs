//! Service layer over the entity store.
//!
//! `TkService` wraps `TkDb` (raw database access) and the retry budget used
//! by publish version assignment. All repo methods are implemented as
//! `impl TkService` in [`crate::repos`] and [`crate::store`].

use tk_config::TkConfig;

use crate::TkDb;
use crate::error::DatabaseError;
use crate::retry::RetryConfig;

/// Explicit handle to one store. Construct it once and pass it around.
pub struct TkService {
    db: TkDb,
    retry: RetryConfig,
}

impl TkService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `retry` - Budget for publish version conflicts.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, retry: RetryConfig) -> Result<Self, DatabaseError> {
        let db = TkDb::open_local(db_path).await?;
        Ok(Self { db, retry })
    }

    /// Open the database named by `config.database.path` with the configured
    /// retry budget.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &TkConfig) -> Result<Self, DatabaseError> {
        Self::new_local(&config.database.path, RetryConfig::from(&config.publish)).await
    }

    /// Create from an existing `TkDb` (for testing).
    #[must_use]
    pub const fn from_db(db: TkDb, retry: RetryConfig) -> Self {
        Self { db, retry }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &TkDb {
        &self.db
    }

    #[must_use]
    pub const fn retry(&self) -> &RetryConfig {
        &self.retry
    }
}
