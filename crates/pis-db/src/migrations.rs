//! Embedded schema, applied on every open. All statements are idempotent.

use crate::error::DatabaseError;

/// Entity tables, link relations, `edit_history` and its append-only triggers.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

pub(crate) async fn run_migrations(conn: &libsql::Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(MIGRATION_001)
        .await
        .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
    Ok(())
}
