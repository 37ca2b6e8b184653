//! Edit history read path.

use pis_core::entities::EditHistory;
use pis_core::enums::{AuditAction, EntityType};

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::UnitOfWork;

/// Filter criteria for history queries. `limit: None` returns every row.
#[derive(Debug, Default, Clone)]
pub struct HistoryFilter {
    pub entity_type: Option<EntityType>,
    pub action: Option<AuditAction>,
    pub edited_by: Option<String>,
    pub limit: Option<u32>,
}

fn row_to_history(row: &libsql::Row) -> Result<EditHistory, DatabaseError> {
    Ok(EditHistory {
        id: row.get::<i64>(0)?,
        edited_by: row.get::<String>(1)?,
        edited_at: parse_datetime(&row.get::<String>(2)?)?,
        entity_type: parse_enum(&row.get::<String>(3)?)?,
        entity_id: row.get::<String>(4)?,
        changes: row.get::<String>(5)?,
        old_value: row.get::<String>(6)?,
        new_value: row.get::<String>(7)?,
        action: parse_enum(&row.get::<String>(8)?)?,
    })
}

impl UnitOfWork {
    /// Newest first; rows written in the same microsecond are ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row does not parse.
    pub async fn history(&self, filter: &HistoryFilter) -> Result<Vec<EditHistory>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(et) = filter.entity_type {
            params.push(libsql::Value::Text(et.as_str().to_string()));
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(libsql::Value::Text(action.as_str().to_string()));
            conditions.push(format!("action = ?{}", params.len()));
        }
        if let Some(ref actor) = filter.edited_by {
            params.push(libsql::Value::Text(actor.clone()));
            conditions.push(format!("edited_by = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = filter
            .limit
            .map_or_else(String::new, |limit| format!("LIMIT {limit}"));
        let sql = format!(
            "SELECT id, edited_by, edited_at, entity_type, entity_id, changes, old_value, new_value, action
             FROM edit_history {where_clause}
             ORDER BY edited_at DESC, id DESC {limit_clause}"
        );

        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_history(&row)?);
        }
        Ok(entries)
    }
}
