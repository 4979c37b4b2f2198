//! Asset repository, scoped by (project, asset type).

use libsql::Value;
use tk_core::entities::{Asset, AssetType, Project};
use tk_core::enums::{CodeKind, EntityKind};
use tk_core::grammar;

use crate::error::DatabaseError;
use crate::helpers::{get_flag, parse_datetime};
use crate::service::TkService;
use crate::store::{Entity, KindDescriptor, NaturalKey, NewRow};

impl Entity for Asset {
    const DESCRIPTOR: KindDescriptor = KindDescriptor {
        kind: EntityKind::Asset,
        table: "assets",
        columns: "id, project_id, asset_type_id, code, active, created_at",
    };

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get::<i64>(0)?,
            project_id: row.get::<i64>(1)?,
            asset_type_id: row.get::<i64>(2)?,
            code: row.get::<String>(3)?,
            active: get_flag(row, 4)?,
            created_at: parse_datetime(&row.get::<String>(5)?)?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

/// Assets are named `{asset type}_{code}` within their project.
fn asset_key(project: &Project, asset_type: &AssetType, code: &str) -> NaturalKey {
    NaturalKey::new(format!("{}_{code}", asset_type.code))
        .with("project_id", project.id)
        .with("asset_type_id", asset_type.id)
        .with("code", code)
        .in_scope(format!("project '{}'", project.code))
}

fn new_asset(project: &Project, asset_type: &AssetType, code: &str) -> NewRow {
    NewRow::new()
        .set("project_id", project.id)
        .set("asset_type_id", asset_type.id)
        .set("code", code)
}

impl TkService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` scoped to the project, e.g.
    /// `asset 'chr_hero_knight' not found in project 'PRJ1'`.
    pub async fn get_asset(
        &self,
        project: &Project,
        asset_type: &AssetType,
        code: &str,
    ) -> Result<Asset, DatabaseError> {
        self.get(&asset_key(project, asset_type, code)).await
    }

    /// Assets of `project`, optionally narrowed to one asset type.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_assets(
        &self,
        project: &Project,
        asset_type: Option<&AssetType>,
    ) -> Result<Vec<Asset>, DatabaseError> {
        let mut filters = vec![("project_id", Value::Integer(project.id))];
        if let Some(asset_type) = asset_type {
            filters.push(("asset_type_id", Value::Integer(asset_type.id)));
        }
        self.list(&filters).await
    }

    /// Return the asset `code` of `asset_type` in `project`, creating it if
    /// absent. An existing asset is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCode` (wrapped) if `code` is not a legal
    /// asset code.
    pub async fn get_or_create_asset(
        &self,
        project: &Project,
        asset_type: &AssetType,
        code: &str,
    ) -> Result<Asset, DatabaseError> {
        grammar::ensure(CodeKind::Asset, code)?;
        self.get_or_create(
            &asset_key(project, asset_type, code),
            &new_asset(project, asset_type, code),
        )
        .await
    }

    /// Create the asset, failing if it already exists in the project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyExists`, e.g.
    /// `asset 'chr_hero_knight' already exists in project 'PRJ1'`.
    pub async fn create_asset(
        &self,
        project: &Project,
        asset_type: &AssetType,
        code: &str,
    ) -> Result<Asset, DatabaseError> {
        grammar::ensure(CodeKind::Asset, code)?;
        self.create(
            &asset_key(project, asset_type, code),
            &new_asset(project, asset_type, code),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project row is gone.
    pub async fn asset_project(&self, asset: &Asset) -> Result<Project, DatabaseError> {
        self.get_by_id(asset.project_id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the asset type row is gone.
    pub async fn asset_asset_type(&self, asset: &Asset) -> Result<AssetType, DatabaseError> {
        self.get_by_id(asset.asset_type_id).await
    }
}
