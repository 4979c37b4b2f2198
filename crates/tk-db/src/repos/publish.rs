//! Publish repository and version assignment.
//!
//! A publish version is `MAX(version) + 1` over every publish sharing the
//! (task, code, publish type, release) tuple, active or not, so a version
//! number is never handed out twice. The read and the insert share one
//! `IMMEDIATE` transaction, so the write lock is held before the maximum is
//! read. A writer that still collides, on the unique constraint or on a lock
//! held past the busy timeout, retries the whole unit.

use libsql::{Connection, TransactionBehavior, Value};
use tk_core::entities::{Publish, PublishType, Task};
use tk_core::enums::{CodeKind, EntityKind, Release};
use tk_core::errors::CoreError;
use tk_core::grammar;

use crate::error::DatabaseError;
use crate::helpers::{get_flag, parse_datetime, parse_enum};
use crate::retry::{lock_contention_as_conflict, retry_conflicts};
use crate::service::TkService;
use crate::store::{self, Entity, KindDescriptor, NaturalKey, NewRow};
use crate::versioning::PublishPath;

impl Entity for Publish {
    const DESCRIPTOR: KindDescriptor = KindDescriptor {
        kind: EntityKind::Publish,
        table: "publishes",
        columns: "id, task_id, publish_type_id, code, path, version, release, size, active, created_at",
    };

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get::<i64>(0)?,
            task_id: row.get::<i64>(1)?,
            publish_type_id: row.get::<i64>(2)?,
            code: row.get::<String>(3)?,
            path: row.get::<String>(4)?,
            version: row.get::<i64>(5)?,
            release: parse_enum(&row.get::<String>(6)?)?,
            size: row.get::<i64>(7)?,
            active: get_flag(row, 8)?,
            created_at: parse_datetime(&row.get::<String>(9)?)?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

/// Optional filters for [`TkService::task_publishes`]. Unset fields match all.
#[derive(Debug, Clone, Default)]
pub struct PublishFilter {
    pub code: Option<String>,
    pub publish_type_id: Option<i64>,
    pub release: Option<Release>,
    pub active: Option<bool>,
}

impl PublishFilter {
    fn conditions(&self, task: &Task) -> Vec<(&'static str, Value)> {
        let mut conditions = vec![("task_id", Value::Integer(task.id))];
        if let Some(ref code) = self.code {
            conditions.push(("code", Value::Text(code.clone())));
        }
        if let Some(publish_type_id) = self.publish_type_id {
            conditions.push(("publish_type_id", Value::Integer(publish_type_id)));
        }
        if let Some(release) = self.release {
            conditions.push(("release", Value::Text(release.as_str().into())));
        }
        if let Some(active) = self.active {
            conditions.push(("active", Value::Integer(i64::from(active))));
        }
        conditions
    }
}

/// Everything one version-assignment attempt needs.
struct NextPublish<'a> {
    task: &'a Task,
    publish_type: &'a PublishType,
    code: &'a str,
    release: Release,
    layout: PublishPath<'a>,
}

async fn max_version(conn: &Connection, next: &NextPublish<'_>) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COALESCE(MAX(version), 0) FROM publishes
             WHERE task_id = ?1 AND code = ?2 AND publish_type_id = ?3 AND release = ?4",
            libsql::params![
                next.task.id,
                next.code,
                next.publish_type.id,
                next.release.as_str()
            ],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<i64>(0)?)
}

/// Compute the next version and insert it. Runs inside the caller's
/// transaction.
async fn insert_next(conn: &Connection, next: &NextPublish<'_>) -> Result<i64, DatabaseError> {
    let version = max_version(conn, next).await? + 1;
    let path = next.layout.path(version);
    let row = NewRow::new()
        .set("task_id", next.task.id)
        .set("publish_type_id", next.publish_type.id)
        .set("code", next.code)
        .set("path", path.as_str())
        .set("version", version)
        .set("release", next.release.as_str())
        .set("size", 0_i64)
        .set("active", 0_i64);

    match store::insert::<Publish>(conn, &row).await {
        // A path is derived from the whole ancestry; another tuple already
        // owning it will not go away on retry.
        Err(DatabaseError::Constraint { detail, .. }) if detail.contains("publishes.path") => {
            Err(DatabaseError::AlreadyExists {
                kind: EntityKind::Publish,
                key: path,
                scope: None,
            })
        }
        other => other,
    }
}

/// One assignment attempt: lock, read the maximum, insert, commit.
async fn assign_next(
    conn: &Connection,
    next: &NextPublish<'_>,
    attempt: u32,
) -> Result<i64, DatabaseError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .await?;
    match insert_next(&tx, next).await {
        Ok(id) => {
            tx.commit().await?;
            Ok(id)
        }
        Err(e) => {
            tracing::debug!(attempt, error = %e, "publish insert failed, rolling back");
            tx.rollback().await?;
            Err(e)
        }
    }
}

impl TkService {
    /// Create the next version of publish `code` for `task`.
    ///
    /// Resolves the ancestry, synthesises the path beneath the project root
    /// and inserts the publish inactive with size zero.
    ///
    /// # Errors
    ///
    /// - `CoreError::InvalidCode` (wrapped) for an illegal publish code.
    /// - `DatabaseError::NotFound` if the publish type or a parent is missing.
    /// - `DatabaseError::MissingConfiguration` if the project has no root.
    /// - `DatabaseError::AlreadyExists` if the synthesised path is taken.
    /// - `DatabaseError::ConstraintViolation` if every attempt lost a race.
    pub async fn create_next_publish(
        &self,
        task: &Task,
        code: &str,
        publish_type_code: &str,
        release: Release,
    ) -> Result<Publish, DatabaseError> {
        grammar::ensure(CodeKind::PublishCode, code)?;
        let publish_type = self.get_publish_type(publish_type_code).await?;
        let task_type = self.task_task_type(task).await?;
        let asset = self.task_asset(task).await?;
        let asset_type = self.asset_asset_type(&asset).await?;
        let project = self.asset_project(&asset).await?;
        let root = self.project_root(&project).await?;

        let next = &NextPublish {
            task,
            publish_type: &publish_type,
            code,
            release,
            layout: PublishPath {
                root: &root,
                asset_type: &asset_type.code,
                asset: &asset.code,
                task_type: &task_type.code,
                publish_code: code,
                file_type: &publish_type.file_type,
                extension: &publish_type.extension,
                release,
            },
        };

        let id = retry_conflicts(self.retry(), move |attempt| async move {
            assign_next(self.db().conn(), next, attempt)
                .await
                .map_err(|e| lock_contention_as_conflict(EntityKind::Publish, e))
        })
        .await?;

        let publish: Publish = self.get_by_id(id).await?;
        tracing::info!(
            project = %project.code,
            asset = %asset.code,
            task_type = %task_type.code,
            code,
            version = %publish.version_name(),
            path = %publish.path,
            "created publish"
        );
        Ok(publish)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no publish has `id`.
    pub async fn get_publish(&self, id: i64) -> Result<Publish, DatabaseError> {
        self.get_by_id(id).await
    }

    /// The publish with an exact version in its tuple.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound`, e.g. `publish 'cache geo_cache w002'
    /// not found in task #1`.
    pub async fn get_publish_version(
        &self,
        task: &Task,
        code: &str,
        publish_type: &PublishType,
        release: Release,
        version: i64,
    ) -> Result<Publish, DatabaseError> {
        let key = NaturalKey::new(format!(
            "{code} {} {}",
            publish_type.code,
            release.version_label(version)
        ))
        .with("task_id", task.id)
        .with("code", code)
        .with("publish_type_id", publish_type.id)
        .with("release", release.as_str())
        .with("version", version)
        .in_scope(format!("task #{}", task.id));
        self.get(&key).await
    }

    /// Publishes of `task` matching `filter`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn task_publishes(
        &self,
        task: &Task,
        filter: &PublishFilter,
    ) -> Result<Vec<Publish>, DatabaseError> {
        self.list(&filter.conditions(task)).await
    }

    /// Highest version in the tuple, or `None` if nothing was published.
    ///
    /// With `active_only`, inactive publishes are skipped. Version
    /// assignment never uses this; it always counts every row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn latest_publish(
        &self,
        task: &Task,
        code: &str,
        publish_type: &PublishType,
        release: Release,
        active_only: bool,
    ) -> Result<Option<Publish>, DatabaseError> {
        let filter = PublishFilter {
            code: Some(code.to_string()),
            publish_type_id: Some(publish_type.id),
            release: Some(release),
            active: active_only.then_some(true),
        };
        let publishes = self.task_publishes(task, &filter).await?;
        Ok(publishes.into_iter().max_by_key(|p| p.version))
    }

    /// Record the size in bytes of the file behind `publish`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidValue` (wrapped) for a negative size.
    pub async fn set_publish_size(
        &self,
        publish: &Publish,
        bytes: i64,
    ) -> Result<Publish, DatabaseError> {
        if bytes < 0 {
            return Err(CoreError::InvalidValue {
                field: "size".into(),
                value: bytes.to_string(),
            }
            .into());
        }
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE publishes SET size = ?1 WHERE id = ?2",
                libsql::params![bytes, publish.id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found(
                EntityKind::Publish,
                format!("#{}", publish.id),
            ));
        }
        self.get_by_id(publish.id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the task row is gone.
    pub async fn publish_task(&self, publish: &Publish) -> Result<Task, DatabaseError> {
        self.get_by_id(publish.task_id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the publish type row is gone.
    pub async fn publish_publish_type(&self, publish: &Publish) -> Result<PublishType, DatabaseError> {
        self.get_by_id(publish.publish_type_id).await
    }
}
