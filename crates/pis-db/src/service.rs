//! Request-scoped unit of work and mutation outcomes.
//!
//! All repo methods are implemented as `impl UnitOfWork` blocks under
//! `repos/`. Every mutation follows this protocol:
//! 1. Validate the payload and check referenced rows exist
//! 2. Execute SQL (one statement, or a transaction when several rows change)
//! 3. Append one `edit_history` row per change through [`AuditLogger`]
//! 4. Fold the audit results into the returned [`Mutation`]
//!
//! Audit rows are committed independently of the primary write. A failed
//! audit append never undoes the primary change; it is reported as
//! [`AuditStatus::Degraded`].

use serde::Serialize;
use tracing::error;

use pis_core::enums::EntityType;

use crate::audit::AuditLogger;
use crate::error::DatabaseError;

/// One database connection acting on behalf of one actor.
///
/// Dropping the unit of work releases the connection.
pub struct UnitOfWork {
    conn: libsql::Connection,
    actor: String,
}

impl UnitOfWork {
    pub(crate) const fn new(conn: libsql::Connection, actor: String) -> Self {
        Self { conn, actor }
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Identity recorded as `edited_by`.
    #[must_use]
    pub fn actor(&self) -> &str {
        &self.actor
    }

    #[must_use]
    pub fn audit(&self) -> AuditLogger<'_> {
        AuditLogger::new(&self.conn, &self.actor)
    }
}

/// Whether the audit rows for a mutation were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuditStatus {
    /// Every row was appended.
    Recorded { entries: usize },
    /// The primary change is committed but at least one audit row is missing.
    Degraded { recorded: usize, error: String },
}

impl AuditStatus {
    /// Fold per-row append results, logging the first failure.
    pub(crate) fn from_results(
        entity_type: EntityType,
        entity_id: &str,
        results: Vec<Result<(), DatabaseError>>,
    ) -> Self {
        let mut recorded = 0;
        let mut first_error = None;
        for result in results {
            match result {
                Ok(()) => recorded += 1,
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e.to_string());
                    }
                }
            }
        }
        match first_error {
            None => Self::Recorded { entries: recorded },
            Some(error) => {
                error!(
                    %entity_type,
                    entity_id,
                    recorded,
                    %error,
                    "audit append failed after committed change"
                );
                Self::Degraded { recorded, error }
            }
        }
    }

    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Number of audit rows written.
    #[must_use]
    pub const fn entries(&self) -> usize {
        match self {
            Self::Recorded { entries } => *entries,
            Self::Degraded { recorded, .. } => *recorded,
        }
    }
}

/// Result of a committed mutation.
#[derive(Debug, Clone, Serialize)]
pub struct Mutation<T> {
    pub value: T,
    pub audit: AuditStatus,
}

impl<T> Mutation<T> {
    pub(crate) const fn new(value: T, audit: AuditStatus) -> Self {
        Self { value, audit }
    }

    /// A mutation that changed nothing and therefore logged nothing.
    pub(crate) const fn unchanged(value: T) -> Self {
        Self {
            value,
            audit: AuditStatus::Recorded { entries: 0 },
        }
    }
}
