//! Task repository. A task is identified by its (asset, task type) pair.

use libsql::Value;
use tk_core::entities::{Asset, Task, TaskType};
use tk_core::enums::EntityKind;

use crate::error::DatabaseError;
use crate::helpers::{get_flag, parse_datetime};
use crate::service::TkService;
use crate::store::{Entity, KindDescriptor, NaturalKey, NewRow};

impl Entity for Task {
    const DESCRIPTOR: KindDescriptor = KindDescriptor {
        kind: EntityKind::Task,
        table: "tasks",
        columns: "id, asset_id, task_type_id, active, created_at",
    };

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get::<i64>(0)?,
            asset_id: row.get::<i64>(1)?,
            task_type_id: row.get::<i64>(2)?,
            active: get_flag(row, 3)?,
            created_at: parse_datetime(&row.get::<String>(4)?)?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

fn task_key(asset: &Asset, task_type: &TaskType) -> NaturalKey {
    NaturalKey::new(task_type.code.clone())
        .with("asset_id", asset.id)
        .with("task_type_id", task_type.id)
        .in_scope(format!("asset '{}'", asset.code))
}

fn new_task(asset: &Asset, task_type: &TaskType) -> NewRow {
    NewRow::new()
        .set("asset_id", asset.id)
        .set("task_type_id", task_type.id)
}

impl TkService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` scoped to the asset.
    pub async fn get_task(&self, asset: &Asset, task_type: &TaskType) -> Result<Task, DatabaseError> {
        self.get(&task_key(asset, task_type)).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_tasks(&self, asset: &Asset) -> Result<Vec<Task>, DatabaseError> {
        self.list(&[("asset_id", Value::Integer(asset.id))]).await
    }

    /// Return the task of `task_type` on `asset`, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store fails.
    pub async fn get_or_create_task(
        &self,
        asset: &Asset,
        task_type: &TaskType,
    ) -> Result<Task, DatabaseError> {
        self.get_or_create(&task_key(asset, task_type), &new_task(asset, task_type))
            .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyExists` if the asset already has a
    /// task of this type.
    pub async fn create_task(&self, asset: &Asset, task_type: &TaskType) -> Result<Task, DatabaseError> {
        self.create(&task_key(asset, task_type), &new_task(asset, task_type))
            .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the asset row is gone.
    pub async fn task_asset(&self, task: &Task) -> Result<Asset, DatabaseError> {
        self.get_by_id(task.asset_id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the task type row is gone.
    pub async fn task_task_type(&self, task: &Task) -> Result<TaskType, DatabaseError> {
        self.get_by_id(task.task_type_id).await
    }

    /// Resolve a task from the codes along its path, e.g.
    /// `PRJ1 / chr / hero_knight / rig`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for the first code that does not
    /// resolve.
    pub async fn resolve_task(
        &self,
        project_code: &str,
        asset_type_code: &str,
        asset_code: &str,
        task_type_code: &str,
    ) -> Result<Task, DatabaseError> {
        let project = self.get_project(project_code).await?;
        let asset_type = self.get_asset_type(asset_type_code).await?;
        let asset = self.get_asset(&project, &asset_type, asset_code).await?;
        let task_type = self.get_task_type(task_type_code).await?;
        self.get_task(&asset, &task_type).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::helpers::{seed, test_service};

    use super::*;

    #[tokio::test]
    async fn one_task_per_asset_and_type() {
        let svc = test_service().await;
        let s = seed(&svc).await;

        let again = svc.get_or_create_task(&s.asset, &s.task_type).await.unwrap();
        assert_eq!(again.id, s.task.id);
        assert_eq!(svc.list_tasks(&s.asset).await.unwrap(), vec![s.task]);
    }

    #[tokio::test]
    async fn strict_create_of_existing_task_fails() {
        let svc = test_service().await;
        let s = seed(&svc).await;
        let err = svc.create_task(&s.asset, &s.task_type).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "task 'rig' already exists in asset 'hero_knight'"
        );
    }

    #[tokio::test]
    async fn resolve_task_by_codes() {
        let svc = test_service().await;
        let s = seed(&svc).await;

        let task = svc
            .resolve_task("PRJ1", "chr", "hero_knight", "rig")
            .await
            .unwrap();
        assert_eq!(task, s.task);
        assert_eq!(svc.task_asset(&task).await.unwrap(), s.asset);
        assert_eq!(svc.task_task_type(&task).await.unwrap(), s.task_type);
    }

    #[tokio::test]
    async fn resolve_task_reports_first_missing_code() {
        let svc = test_service().await;
        seed(&svc).await;

        let err = svc
            .resolve_task("PRJ1", "chr", "hero_knight", "anim_block")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::NotFound { kind: EntityKind::TaskType, ref key, .. } if key == "anim_block"
        ));
    }
}
