//! Generic entity store.
//!
//! Every entity kind is described once by an [`Entity`] impl (table, selected
//! columns, row parser). The functions here build parameterised SQL from that
//! descriptor, so fetch/list/insert/activate exist exactly once for all seven
//! kinds. Free functions take a `&Connection` so they run unchanged inside a
//! `libsql::Transaction`.

use libsql::{Connection, Value};
use tk_core::enums::EntityKind;

use crate::error::DatabaseError;
use crate::retry::is_unique_violation;
use crate::service::TkService;

/// Static description of one entity table.
#[derive(Debug, Clone, Copy)]
pub struct KindDescriptor {
    pub kind: EntityKind,
    pub table: &'static str,
    /// Comma-separated column list, in the order `from_row` reads them.
    pub columns: &'static str,
}

/// A row type the generic store can read and write.
pub trait Entity: Sized + Send {
    const DESCRIPTOR: KindDescriptor;

    /// Parse one row selected with [`KindDescriptor::columns`].
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a column is missing or malformed.
    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError>;

    fn id(&self) -> i64;
}

/// Equality conditions that identify a row, plus how to name it in errors.
#[derive(Debug, Clone)]
pub struct NaturalKey {
    conditions: Vec<(&'static str, Value)>,
    label: String,
    scope: Option<String>,
}

impl NaturalKey {
    /// Key on the `code` column alone (the global taxonomies and projects).
    #[must_use]
    pub fn code(code: &str) -> Self {
        Self::new(code).with("code", code)
    }

    /// Empty key labelled `label`; add columns with [`Self::with`].
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            conditions: Vec::new(),
            label: label.into(),
            scope: None,
        }
    }

    #[must_use]
    pub fn with(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push((column, value.into()));
        self
    }

    /// Parent the key is unique within, e.g. `project 'PRJ1'`.
    #[must_use]
    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    fn already_exists(&self, kind: EntityKind) -> DatabaseError {
        DatabaseError::AlreadyExists {
            kind,
            key: self.label.clone(),
            scope: self.scope.clone(),
        }
    }

    fn not_found(&self, kind: EntityKind) -> DatabaseError {
        DatabaseError::NotFound {
            kind,
            key: self.label.clone(),
            scope: self.scope.clone(),
        }
    }
}

/// Column values for a single insert.
#[derive(Debug, Clone, Default)]
pub struct NewRow {
    values: Vec<(&'static str, Value)>,
}

impl NewRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.values.push((column, value.into()));
        self
    }

    /// Values of the columns named in a `UNIQUE constraint failed` detail,
    /// joined with `/`. `None` if the detail names none of this row's columns.
    fn conflicting_value(&self, table: &str, detail: &str) -> Option<String> {
        let values: Vec<String> = self
            .values
            .iter()
            .filter(|(column, _)| detail.contains(&format!("{table}.{column}")))
            .filter_map(|(_, value)| match value {
                Value::Text(text) => Some(text.clone()),
                Value::Integer(n) => Some(n.to_string()),
                _ => None,
            })
            .collect();
        (!values.is_empty()).then(|| values.join("/"))
    }
}

/// Map a unique violation on a column outside the natural key (e.g. a
/// taxonomy `name`) to `AlreadyExists` naming the rejected value.
fn secondary_conflict(
    kind: EntityKind,
    table: &str,
    key: &NaturalKey,
    row: &NewRow,
    err: DatabaseError,
) -> DatabaseError {
    let value = match &err {
        DatabaseError::Constraint { detail, .. } => row.conflicting_value(table, detail),
        _ => None,
    };
    match value {
        Some(value) => DatabaseError::AlreadyExists {
            kind,
            key: value,
            scope: key.scope.clone(),
        },
        None => err,
    }
}

/// Render `col1 = ?1 AND col2 = ?2 ...` and the matching parameter list.
fn where_clause(conditions: &[(&'static str, Value)]) -> (String, Vec<Value>) {
    let mut clauses = Vec::with_capacity(conditions.len());
    let mut params = Vec::with_capacity(conditions.len());
    for (idx, (column, value)) in conditions.iter().enumerate() {
        clauses.push(format!("{column} = ?{}", idx + 1));
        params.push(value.clone());
    }
    let sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    (sql, params)
}

async fn query_all<E: Entity>(
    conn: &Connection,
    sql: &str,
    params: Vec<Value>,
) -> Result<Vec<E>, DatabaseError> {
    let mut rows = conn.query(sql, libsql::params_from_iter(params)).await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(E::from_row(&row)?);
    }
    Ok(results)
}

/// Fetch the row matching `key`, if any.
///
/// # Errors
///
/// Returns `DatabaseError` if the query or row parsing fails.
pub async fn fetch<E: Entity>(
    conn: &Connection,
    key: &NaturalKey,
) -> Result<Option<E>, DatabaseError> {
    let d = E::DESCRIPTOR;
    let (filter, params) = where_clause(&key.conditions);
    let sql = format!("SELECT {} FROM {}{filter} LIMIT 1", d.columns, d.table);
    Ok(query_all::<E>(conn, &sql, params).await?.into_iter().next())
}

/// Fetch the row with the given id, if any.
///
/// # Errors
///
/// Returns `DatabaseError` if the query or row parsing fails.
pub async fn fetch_by_id<E: Entity>(conn: &Connection, id: i64) -> Result<Option<E>, DatabaseError> {
    let d = E::DESCRIPTOR;
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", d.columns, d.table);
    Ok(query_all::<E>(conn, &sql, vec![Value::Integer(id)])
        .await?
        .into_iter()
        .next())
}

/// All rows matching every filter, ordered by id.
///
/// # Errors
///
/// Returns `DatabaseError` if the query or row parsing fails.
pub async fn list<E: Entity>(
    conn: &Connection,
    filters: &[(&'static str, Value)],
) -> Result<Vec<E>, DatabaseError> {
    let d = E::DESCRIPTOR;
    let (filter, params) = where_clause(filters);
    let sql = format!("SELECT {} FROM {}{filter} ORDER BY id", d.columns, d.table);
    query_all::<E>(conn, &sql, params).await
}

/// Insert one row and return its id.
///
/// # Errors
///
/// Returns `DatabaseError::Constraint` on a unique violation, or
/// `DatabaseError::LibSql` for any other store failure.
pub async fn insert<E: Entity>(conn: &Connection, row: &NewRow) -> Result<i64, DatabaseError> {
    let d = E::DESCRIPTOR;
    let columns: Vec<&str> = row.values.iter().map(|(c, _)| *c).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        d.table,
        columns.join(", "),
        placeholders.join(", ")
    );
    let params: Vec<Value> = row.values.iter().map(|(_, v)| v.clone()).collect();

    match conn.execute(&sql, libsql::params_from_iter(params)).await {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(DatabaseError::Constraint {
            kind: d.kind,
            detail: e.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Set the `active` flag of the row with `id`.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if no row has that id.
pub async fn set_active<E: Entity>(
    conn: &Connection,
    id: i64,
    active: bool,
) -> Result<(), DatabaseError> {
    let d = E::DESCRIPTOR;
    let sql = format!("UPDATE {} SET active = ?1 WHERE id = ?2", d.table);
    let changed = conn
        .execute(&sql, libsql::params![i64::from(active), id])
        .await?;
    if changed == 0 {
        return Err(DatabaseError::not_found(d.kind, format!("#{id}")));
    }
    Ok(())
}

impl TkService {
    /// Look up a row by natural key.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` naming the key if no row matches.
    pub async fn get<E: Entity>(&self, key: &NaturalKey) -> Result<E, DatabaseError> {
        fetch::<E>(self.db().conn(), key)
            .await?
            .ok_or_else(|| key.not_found(E::DESCRIPTOR.kind))
    }

    /// Look up a row by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the id does not resolve.
    pub async fn get_by_id<E: Entity>(&self, id: i64) -> Result<E, DatabaseError> {
        fetch_by_id::<E>(self.db().conn(), id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(E::DESCRIPTOR.kind, format!("#{id}")))
    }

    /// Rows matching every filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list<E: Entity>(
        &self,
        filters: &[(&'static str, Value)],
    ) -> Result<Vec<E>, DatabaseError> {
        list::<E>(self.db().conn(), filters).await
    }

    /// Return the row matching `key`, inserting `row` first if there is none.
    ///
    /// A unique violation on insert means another writer created the row
    /// between our read and write; the winner's row is returned.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyExists` naming the value if the insert
    /// collides on a unique column outside `key`, or `DatabaseError` if the
    /// store fails.
    pub async fn get_or_create<E: Entity>(
        &self,
        key: &NaturalKey,
        row: &NewRow,
    ) -> Result<E, DatabaseError> {
        let conn = self.db().conn();
        if let Some(existing) = fetch::<E>(conn, key).await? {
            return Ok(existing);
        }

        match insert::<E>(conn, row).await {
            Ok(id) => {
                tracing::debug!(kind = %E::DESCRIPTOR.kind, key = key.label(), id, "created");
                fetch_by_id::<E>(conn, id).await?.ok_or(DatabaseError::NoResult)
            }
            Err(e) if e.is_conflict() => match fetch::<E>(conn, key).await? {
                Some(winner) => Ok(winner),
                None => Err(secondary_conflict(
                    E::DESCRIPTOR.kind,
                    E::DESCRIPTOR.table,
                    key,
                    row,
                    e,
                )),
            },
            Err(e) => Err(e),
        }
    }

    /// Insert `row`, failing if a row with `key` already exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyExists` naming the key and its scope,
    /// or naming the rejected value when another unique column collides.
    pub async fn create<E: Entity>(&self, key: &NaturalKey, row: &NewRow) -> Result<E, DatabaseError> {
        let kind = E::DESCRIPTOR.kind;
        let conn = self.db().conn();
        if fetch::<E>(conn, key).await?.is_some() {
            return Err(key.already_exists(kind));
        }

        match insert::<E>(conn, row).await {
            Ok(id) => {
                tracing::debug!(%kind, key = key.label(), id, "created");
                fetch_by_id::<E>(conn, id).await?.ok_or(DatabaseError::NoResult)
            }
            Err(e) if e.is_conflict() => {
                if fetch::<E>(conn, key).await?.is_some() {
                    Err(key.already_exists(kind))
                } else {
                    Err(secondary_conflict(kind, E::DESCRIPTOR.table, key, row, e))
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Toggle the soft-activation flag of any entity.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the id does not resolve.
    pub async fn set_active<E: Entity>(&self, id: i64, active: bool) -> Result<(), DatabaseError> {
        set_active::<E>(self.db().conn(), id, active).await?;
        tracing::debug!(kind = %E::DESCRIPTOR.kind, id, active, "set active");
        Ok(())
    }
}
