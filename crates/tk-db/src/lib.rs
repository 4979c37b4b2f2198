//! # tk-db
//!
//! libSQL storage for the tk pipeline store.
//!
//! Holds every production entity: projects, the asset/task/publish
//! taxonomies, assets, tasks and versioned publishes. Layers, leaves first:
//!
//! - [`store`]: one generic create/fetch/list/activate implementation shared
//!   by every entity kind through the [`store::Entity`] descriptor trait.
//! - [`repos`]: per-kind operations on [`service::TkService`], including the
//!   scoped get-or-create of assets and tasks.
//! - [`versioning`]: deterministic publish path synthesis; version assignment
//!   lives in [`repos::publish`] and retries through [`retry`].

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod retry;
pub mod service;
pub mod store;
pub mod versioning;

mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// How long a connection waits on another writer's lock before SQLite
/// reports `database is locked`.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Central database handle for all tk state operations.
///
/// Wraps a libSQL database and one connection. Pass it explicitly into
/// [`service::TkService`]; there is no process-wide handle.
pub struct TkDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl TkDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
        // Several handles may share one file; wait for their locks instead of
        // failing immediately.
        conn.query(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"), ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA busy_timeout: {e}")))?;

        let tk_db = Self { db, conn };
        tk_db.run_migrations().await?;
        tracing::debug!(path, "opened tk database");
        Ok(tk_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
