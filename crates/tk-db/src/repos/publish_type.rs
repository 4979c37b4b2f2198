//! Publish type repository.

use tk_core::entities::PublishType;
use tk_core::enums::{CodeKind, EntityKind};
use tk_core::grammar;

use crate::error::DatabaseError;
use crate::helpers::{get_flag, parse_datetime};
use crate::service::TkService;
use crate::store::{Entity, KindDescriptor, NaturalKey, NewRow};

impl Entity for PublishType {
    const DESCRIPTOR: KindDescriptor = KindDescriptor {
        kind: EntityKind::PublishType,
        table: "publish_types",
        columns: "id, code, file_type, extension, active, created_at",
    };

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get::<i64>(0)?,
            code: row.get::<String>(1)?,
            file_type: row.get::<String>(2)?,
            extension: row.get::<String>(3)?,
            active: get_flag(row, 4)?,
            created_at: parse_datetime(&row.get::<String>(5)?)?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

/// Validate the codes and normalise the extension to carry its leading dot.
fn new_publish_type(code: &str, file_type: &str, extension: &str) -> Result<NewRow, DatabaseError> {
    grammar::ensure(CodeKind::PublishType, code)?;
    grammar::ensure(CodeKind::FileDescription, file_type)?;
    let extension = grammar::normalize_extension(extension)?;
    Ok(NewRow::new()
        .set("code", code)
        .set("file_type", file_type)
        .set("extension", extension))
}

impl TkService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no publish type has `code`.
    pub async fn get_publish_type(&self, code: &str) -> Result<PublishType, DatabaseError> {
        self.get(&NaturalKey::code(code)).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_publish_types(&self) -> Result<Vec<PublishType>, DatabaseError> {
        self.list(&[]).await
    }

    /// Return publish type `code`, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCode` or `CoreError::InvalidValue`
    /// (wrapped) for an illegal code, file type or extension.
    pub async fn get_or_create_publish_type(
        &self,
        code: &str,
        file_type: &str,
        extension: &str,
    ) -> Result<PublishType, DatabaseError> {
        let row = new_publish_type(code, file_type, extension)?;
        self.get_or_create(&NaturalKey::code(code), &row).await
    }

    /// Create publish type `code`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyExists` if the code is taken, and the
    /// same validation errors as [`Self::get_or_create_publish_type`].
    pub async fn create_publish_type(
        &self,
        code: &str,
        file_type: &str,
        extension: &str,
    ) -> Result<PublishType, DatabaseError> {
        let row = new_publish_type(code, file_type, extension)?;
        self.create(&NaturalKey::code(code), &row).await
    }
}

#[cfg(test)]
mod tests {
    use tk_core::errors::CoreError;

    use crate::test_support::helpers::test_service;

    use super::*;

    #[tokio::test]
    async fn extension_gains_leading_dot() {
        let svc = test_service().await;
        let usd = svc.create_publish_type("scene", "usd", "usd").await.unwrap();
        assert_eq!(usd.extension, ".usd");
        let abc = svc.create_publish_type("geo_cache", "abc", ".abc").await.unwrap();
        assert_eq!(abc.extension, ".abc");
    }

    #[tokio::test]
    async fn file_type_must_be_a_file_description() {
        let svc = test_service().await;
        let err = svc
            .create_publish_type("geo_cache", "abc1", ".abc")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::InvalidCode {
                kind: CodeKind::FileDescription,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn path_unsafe_extension_writes_nothing() {
        let svc = test_service().await;
        for extension in ["", "abc/../../x", ".ABC "] {
            let err = svc
                .create_publish_type("geo_cache", "abc", extension)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                DatabaseError::Core(CoreError::InvalidValue { ref field, .. }) if field == "extension"
            ));
        }
        assert!(svc.list_publish_types().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_publish_type_not_found() {
        let svc = test_service().await;
        let err = svc.get_publish_type("geo_cache").await.unwrap_err();
        assert_eq!(err.to_string(), "publish type 'geo_cache' not found");
    }
}
