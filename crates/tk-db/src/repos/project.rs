//! Project repository: lookup, creation, metadata and the production root.

use tk_core::entities::{ENVIRONMENT_KEY, Metadata, Project, ROOT_PATH_KEY};
use tk_core::enums::{CodeKind, EntityKind};
use tk_core::errors::CoreError;
use tk_core::grammar;

use crate::error::DatabaseError;
use crate::helpers::{get_flag, parse_datetime, parse_metadata};
use crate::service::TkService;
use crate::store::{Entity, KindDescriptor, NaturalKey, NewRow};

impl Entity for Project {
    const DESCRIPTOR: KindDescriptor = KindDescriptor {
        kind: EntityKind::Project,
        table: "projects",
        columns: "id, code, name, metadata, active, created_at",
    };

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get::<i64>(0)?,
            code: row.get::<String>(1)?,
            name: row.get::<String>(2)?,
            metadata: parse_metadata(&row.get::<String>(3)?)?,
            active: get_flag(row, 4)?,
            created_at: parse_datetime(&row.get::<String>(5)?)?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

fn new_project(code: &str, name: &str) -> NewRow {
    NewRow::new().set("code", code).set("name", name)
}

fn metadata_json(metadata: &Metadata) -> Result<String, DatabaseError> {
    serde_json::to_string(metadata).map_err(|e| DatabaseError::Other(e.into()))
}

impl TkService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no project has `code`.
    pub async fn get_project(&self, code: &str) -> Result<Project, DatabaseError> {
        self.get(&NaturalKey::code(code)).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        self.list(&[]).await
    }

    /// Return project `code`, creating it with `name` if absent.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCode` (wrapped) if `code` is not a legal
    /// project code; nothing is written in that case.
    pub async fn get_or_create_project(
        &self,
        code: &str,
        name: &str,
    ) -> Result<Project, DatabaseError> {
        grammar::ensure(CodeKind::Project, code)?;
        self.get_or_create(&NaturalKey::code(code), &new_project(code, name))
            .await
    }

    /// Create project `code`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyExists` if the code is taken.
    pub async fn create_project(&self, code: &str, name: &str) -> Result<Project, DatabaseError> {
        grammar::ensure(CodeKind::Project, code)?;
        self.create(&NaturalKey::code(code), &new_project(code, name))
            .await
    }

    /// Current metadata of `project`, re-read from the store.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project row is gone.
    pub async fn project_metadata(&self, project: &Project) -> Result<Metadata, DatabaseError> {
        let current: Project = self.get_by_id(project.id).await?;
        Ok(current.metadata)
    }

    /// Replace the metadata map of `project` and return the updated row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project row is gone.
    pub async fn update_project_metadata(
        &self,
        project: &Project,
        metadata: &Metadata,
    ) -> Result<Project, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE projects SET metadata = ?1 WHERE id = ?2",
                libsql::params![metadata_json(metadata)?, project.id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found(EntityKind::Project, &project.code));
        }
        self.get_by_id(project.id).await
    }

    /// Store `root` as `environment.root_path`, keeping every other
    /// metadata entry.
    ///
    /// A root that does not end in the project's own code is accepted but
    /// logged, since publish paths are built beneath it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidValue` (wrapped) for an empty root.
    pub async fn set_project_root(
        &self,
        project: &Project,
        root: &str,
    ) -> Result<Project, DatabaseError> {
        if root.trim().is_empty() {
            return Err(CoreError::InvalidValue {
                field: ROOT_PATH_KEY.into(),
                value: root.to_string(),
            }
            .into());
        }
        if grammar::project_code_from_root(root) != Some(project.code.as_str()) {
            tracing::warn!(
                project = %project.code,
                root,
                "project root does not end with the project code"
            );
        }

        let mut metadata = self.project_metadata(project).await?;
        let environment = metadata
            .entry(ENVIRONMENT_KEY)
            .or_insert_with(|| serde_json::Value::Object(Metadata::new()));
        if !environment.is_object() {
            *environment = serde_json::Value::Object(Metadata::new());
        }
        if let Some(env) = environment.as_object_mut() {
            env.insert(ROOT_PATH_KEY.into(), root.into());
        }

        let updated = self.update_project_metadata(project, &metadata).await?;
        tracing::debug!(project = %updated.code, root, "set project root");
        Ok(updated)
    }

    /// Production root path of `project`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::MissingConfiguration` if no root is stored.
    pub async fn project_root(&self, project: &Project) -> Result<String, DatabaseError> {
        let current: Project = self.get_by_id(project.id).await?;
        current
            .root_path()
            .map(String::from)
            .ok_or_else(|| DatabaseError::MissingConfiguration {
                project: current.code.clone(),
                key: format!("{ENVIRONMENT_KEY}.{ROOT_PATH_KEY}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::test_support::helpers::test_service;

    use super::*;

    #[tokio::test]
    async fn create_and_get_project() {
        let svc = test_service().await;
        let created = svc.create_project("PRJ1", "Project One").await.unwrap();
        let fetched = svc.get_project("PRJ1").await.unwrap();
        assert_eq!(created, fetched);
        assert!(fetched.active);
        assert!(fetched.metadata.is_empty());
    }

    #[tokio::test]
    async fn create_project_twice_fails() {
        let svc = test_service().await;
        svc.create_project("PRJ1", "Project One").await.unwrap();
        let err = svc.create_project("PRJ1", "Again").await.unwrap_err();
        assert_eq!(err.to_string(), "project 'PRJ1' already exists");
    }

    #[tokio::test]
    async fn invalid_code_writes_nothing() {
        let svc = test_service().await;
        let err = svc.get_or_create_project("prj1", "Lower").await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::InvalidCode {
                kind: CodeKind::Project,
                ..
            })
        ));
        assert!(svc.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_project_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_project("NOPE").await.unwrap_err();
        assert_eq!(err.to_string(), "project 'NOPE' not found");
    }

    #[tokio::test]
    async fn set_root_keeps_other_metadata() {
        let svc = test_service().await;
        let project = svc.create_project("PRJ1", "Project One").await.unwrap();

        let mut metadata = Metadata::new();
        metadata.insert("fps".into(), json!(24));
        metadata.insert(ENVIRONMENT_KEY.into(), json!({ "farm": "local" }));
        let project = svc.update_project_metadata(&project, &metadata).await.unwrap();

        let project = svc.set_project_root(&project, "/prod/PRJ1").await.unwrap();
        assert_eq!(project.metadata["fps"], json!(24));
        assert_eq!(
            project.metadata[ENVIRONMENT_KEY],
            json!({ "farm": "local", "root_path": "/prod/PRJ1" })
        );
        assert_eq!(svc.project_root(&project).await.unwrap(), "/prod/PRJ1");
    }

    #[tokio::test]
    async fn missing_root_is_configuration_error() {
        let svc = test_service().await;
        let project = svc.create_project("PRJ1", "Project One").await.unwrap();
        let err = svc.project_root(&project).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::MissingConfiguration { ref project, ref key }
                if project == "PRJ1" && key == "environment.root_path"
        ));
    }

    #[tokio::test]
    async fn empty_root_rejected() {
        let svc = test_service().await;
        let project = svc.create_project("PRJ1", "Project One").await.unwrap();
        assert!(svc.set_project_root(&project, "  ").await.is_err());
        assert!(svc.project_root(&project).await.is_err());
    }
}
