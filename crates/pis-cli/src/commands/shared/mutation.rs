use pis_core::enums::EntityType;
use pis_db::service::{AuditStatus, Mutation};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Response printed after a delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub entity_type: EntityType,
    pub id: String,
    pub deleted: bool,
}

/// Print the mutated value, warning if its audit rows are incomplete.
pub fn finish<T: Serialize>(mutation: Mutation<T>, flags: &GlobalFlags) -> anyhow::Result<()> {
    warn_if_degraded(&mutation.audit, flags);
    output(&mutation.value, flags.format)
}

/// Print a delete confirmation, warning if its audit row is missing.
pub fn finish_delete(
    entity_type: EntityType,
    id: &str,
    mutation: &Mutation<()>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    warn_if_degraded(&mutation.audit, flags);
    output(
        &Deleted {
            entity_type,
            id: id.to_string(),
            deleted: true,
        },
        flags.format,
    )
}

fn warn_if_degraded(audit: &AuditStatus, flags: &GlobalFlags) {
    if let AuditStatus::Degraded { recorded, error } = audit {
        if !flags.quiet {
            eprintln!(
                "warning: change saved but edit history is incomplete ({recorded} rows written): {error}"
            );
        }
    }
}
