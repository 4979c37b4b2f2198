//! Task type repository.

use tk_core::entities::TaskType;
use tk_core::enums::{CodeKind, EntityKind};
use tk_core::grammar;

use crate::error::DatabaseError;
use crate::helpers::{get_flag, parse_datetime};
use crate::service::TkService;
use crate::store::{Entity, KindDescriptor, NaturalKey, NewRow};

impl Entity for TaskType {
    const DESCRIPTOR: KindDescriptor = KindDescriptor {
        kind: EntityKind::TaskType,
        table: "task_types",
        columns: "id, code, name, active, created_at",
    };

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get::<i64>(0)?,
            code: row.get::<String>(1)?,
            name: row.get::<String>(2)?,
            active: get_flag(row, 3)?,
            created_at: parse_datetime(&row.get::<String>(4)?)?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

fn new_task_type(code: &str, name: &str) -> NewRow {
    let name = if name.trim().is_empty() { code } else { name };
    NewRow::new().set("code", code).set("name", name)
}

impl TkService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no task type has `code`.
    pub async fn get_task_type(&self, code: &str) -> Result<TaskType, DatabaseError> {
        self.get(&NaturalKey::code(code)).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_task_types(&self) -> Result<Vec<TaskType>, DatabaseError> {
        self.list(&[]).await
    }

    /// Return task type `code`, creating it with `name` if absent.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCode` (wrapped) for an illegal code, or
    /// `DatabaseError::AlreadyExists` if another task type holds `name`.
    pub async fn get_or_create_task_type(
        &self,
        code: &str,
        name: &str,
    ) -> Result<TaskType, DatabaseError> {
        grammar::ensure(CodeKind::TaskType, code)?;
        self.get_or_create(&NaturalKey::code(code), &new_task_type(code, name))
            .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyExists` if the code or the name is
    /// taken.
    pub async fn create_task_type(&self, code: &str, name: &str) -> Result<TaskType, DatabaseError> {
        grammar::ensure(CodeKind::TaskType, code)?;
        self.create(&NaturalKey::code(code), &new_task_type(code, name))
            .await
    }
}
