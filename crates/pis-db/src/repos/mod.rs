//! Repository methods on [`UnitOfWork`], one module per entity.
//!
//! Audited entities implement [`StoredEntity`] so the shared get, update
//! and delete paths below can build SQL and audit rows without knowing the
//! entity's shape. Create and row parsing stay in each entity's module.

pub mod code;
pub mod contact;
pub mod history;
pub mod link;
pub mod permit;
pub mod photo;
pub mod property;
pub mod service;
pub mod suite;
pub mod utility;

use serde::Serialize;

use pis_core::describe::EntityRef;
use pis_core::enums::EntityType;

use crate::error::DatabaseError;
use crate::service::{AuditStatus, Mutation, UnitOfWork};
use crate::updates::{FieldChange, update_statement};

/// An audited row type with a single-column key.
pub trait StoredEntity: Serialize + Sized {
    const ENTITY_TYPE: EntityType;
    const TABLE: &'static str;
    const KEY: &'static str;
    /// Column list in `from_row` order.
    const COLUMNS: &'static str;

    /// # Errors
    ///
    /// Returns `DatabaseError` if a column is missing or mistyped.
    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError>;

    fn key(&self) -> libsql::Value;

    /// Raw key as shown in `edit_history.entity_id` before the label.
    fn display_id(&self) -> String;

    fn entity_ref(&self) -> EntityRef<'_>;
}

pub(crate) async fn exists(
    conn: &libsql::Connection,
    table: &str,
    key_column: &str,
    key: libsql::Value,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT 1 FROM {table} WHERE {key_column} = ?1 LIMIT 1"),
            [key],
        )
        .await?;
    Ok(rows.next().await?.is_some())
}

/// NotFound unless the property exists.
pub(crate) async fn ensure_property(
    conn: &libsql::Connection,
    yardi: &str,
) -> Result<(), DatabaseError> {
    if exists(conn, "properties", "yardi", yardi.into()).await? {
        Ok(())
    } else {
        Err(DatabaseError::not_found(EntityType::Property.as_str(), yardi))
    }
}

/// Validate a child's `property_yardi` change before it is applied.
pub(crate) async fn check_property_move(
    conn: &libsql::Connection,
    current: &str,
    requested: Option<&str>,
) -> Result<(), DatabaseError> {
    match requested {
        Some(yardi) if yardi != current => {
            if yardi.trim().is_empty() {
                return Err(DatabaseError::Validation(
                    "property_yardi must not be empty".into(),
                ));
            }
            ensure_property(conn, yardi).await
        }
        _ => Ok(()),
    }
}

/// Conflict if an explicit id is already taken.
pub(crate) async fn ensure_id_free<T: StoredEntity>(
    conn: &libsql::Connection,
    id: Option<i64>,
) -> Result<(), DatabaseError> {
    if let Some(id) = id {
        if exists(conn, T::TABLE, T::KEY, id.into()).await? {
            return Err(DatabaseError::Conflict(format!(
                "{} {id} already exists",
                T::ENTITY_TYPE
            )));
        }
    }
    Ok(())
}

/// Run an INSERT whose first parameter is the (possibly null) integer key and
/// return the key that was stored.
pub(crate) async fn insert_with_key(
    conn: &libsql::Connection,
    sql: &str,
    params: Vec<libsql::Value>,
    explicit: Option<i64>,
) -> Result<i64, DatabaseError> {
    conn.execute(sql, libsql::params_from_iter(params)).await?;
    Ok(explicit.unwrap_or_else(|| conn.last_insert_rowid()))
}

impl UnitOfWork {
    pub(crate) async fn fetch<T: StoredEntity>(
        &self,
        key: libsql::Value,
        id: &dyn std::fmt::Display,
    ) -> Result<T, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            T::COLUMNS,
            T::TABLE,
            T::KEY
        );
        let mut rows = self.conn().query(&sql, [key]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(T::ENTITY_TYPE.as_str(), id))?;
        T::from_row(&row)
    }

    /// All rows, optionally restricted to one property, in `order_by` order.
    pub(crate) async fn fetch_for_property<T: StoredEntity>(
        &self,
        property_yardi: Option<&str>,
        order_by: &str,
    ) -> Result<Vec<T>, DatabaseError> {
        let (where_clause, params) = match property_yardi {
            Some(yardi) => (
                "WHERE property_yardi = ?1",
                vec![libsql::Value::Text(yardi.to_string())],
            ),
            None => ("", Vec::new()),
        };
        let sql = format!(
            "SELECT {} FROM {} {where_clause} ORDER BY {order_by}",
            T::COLUMNS,
            T::TABLE
        );
        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(T::from_row(&row)?);
        }
        Ok(items)
    }

    /// Append the `created` row for a freshly committed entity.
    pub(crate) async fn audit_created<T: StoredEntity>(&self, entity: T) -> Mutation<T> {
        let id = entity.display_id();
        let result = self
            .audit()
            .record_create(T::ENTITY_TYPE, &id, &entity, Some(entity.entity_ref()))
            .await;
        let status = AuditStatus::from_results(T::ENTITY_TYPE, &id, vec![result]);
        Mutation::new(entity, status)
    }

    /// Write `changes` (already applied to `entity`) and log one row per field.
    pub(crate) async fn commit_changes<T: StoredEntity>(
        &self,
        entity: T,
        changes: Vec<FieldChange>,
    ) -> Result<Mutation<T>, DatabaseError> {
        if changes.is_empty() {
            return Ok(Mutation::unchanged(entity));
        }

        let (sql, params) = update_statement(T::TABLE, T::KEY, entity.key(), &changes);
        self.conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        let id = entity.display_id();
        let audit = self.audit();
        let mut results = Vec::with_capacity(changes.len());
        for change in &changes {
            results.push(
                audit
                    .record_edit(
                        T::ENTITY_TYPE,
                        &id,
                        change.field,
                        &change.old_value,
                        &change.new_value,
                        Some(entity.entity_ref()),
                    )
                    .await,
            );
        }
        let status = AuditStatus::from_results(T::ENTITY_TYPE, &id, results);
        Ok(Mutation::new(entity, status))
    }

    /// Log the pre-delete snapshot, then remove the row.
    pub(crate) async fn delete_audited<T: StoredEntity>(
        &self,
        entity: &T,
    ) -> Result<Mutation<()>, DatabaseError> {
        let id = entity.display_id();
        let result = self
            .audit()
            .record_delete(T::ENTITY_TYPE, &id, entity, Some(entity.entity_ref()))
            .await;

        self.conn()
            .execute(
                &format!("DELETE FROM {} WHERE {} = ?1", T::TABLE, T::KEY),
                [entity.key()],
            )
            .await?;

        let status = AuditStatus::from_results(T::ENTITY_TYPE, &id, vec![result]);
        Ok(Mutation::new((), status))
    }
}
