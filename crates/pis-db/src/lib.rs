//! # pis-db
//!
//! libSQL storage for the property information system.
//!
//! - [`PisDb`] is the process-wide handle; it applies the embedded schema on open.
//! - [`service::UnitOfWork`] is the request-scoped connection. Every entity
//!   repo method lives on it, and every mutation returns a
//!   [`service::Mutation`] carrying the audit outcome.
//! - [`audit::AuditLogger`] appends `edit_history` rows, each in its own
//!   autocommitted statement.
//! - [`repos::link`] maintains the suite/service/utility contact relations.

pub mod audit;
pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use service::UnitOfWork;
use tracing::{debug, info};

/// Path that selects a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Process-wide database handle.
///
/// Opened once; hands out one connection per [`UnitOfWork`]. An in-memory
/// database exists only on the connection that created it, so for
/// [`MEMORY_PATH`] every unit of work shares that one connection.
pub struct PisDb {
    db: libsql::Database,
    memory: Option<libsql::Connection>,
}

impl PisDb {
    /// Open (or create) a local database file and apply the schema.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the
    /// schema fails to apply.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = connect(&db).await?;
        migrations::run_migrations(&conn).await?;
        info!(path, "database opened");

        let memory = (path == MEMORY_PATH).then_some(conn);
        Ok(Self { db, memory })
    }

    /// Open a private in-memory database. Used by tests and dry runs.
    ///
    /// # Errors
    ///
    /// See [`Self::open_local`].
    pub async fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::open_local(MEMORY_PATH).await
    }

    /// Start a request-scoped unit of work acting as `actor`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a connection cannot be established.
    pub async fn unit_of_work(&self, actor: impl Into<String>) -> Result<UnitOfWork, DatabaseError> {
        let conn = match &self.memory {
            Some(shared) => shared.clone(),
            None => connect(&self.db).await?,
        };
        let actor = actor.into();
        debug!(%actor, "unit of work started");
        Ok(UnitOfWork::new(conn, actor))
    }
}

/// Open a connection with foreign keys enforced.
async fn connect(db: &libsql::Database) -> Result<libsql::Connection, DatabaseError> {
    let conn = db.connect()?;
    // Must be set per connection in SQLite.
    conn.execute("PRAGMA foreign_keys = ON", ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
    Ok(conn)
}
