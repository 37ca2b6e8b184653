use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AuditAction, EntityType};

/// One immutable audit row.
///
/// `entity_id` is a display string (`"3"` or `"3 / 101"`), and `changes`
/// holds either the changed field name or a `created`/`deleted` marker.
/// Values are never null; a missing value is the empty string.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EditHistory {
    pub id: i64,
    pub edited_by: String,
    pub edited_at: DateTime<Utc>,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub changes: String,
    pub old_value: String,
    pub new_value: String,
    pub action: AuditAction,
}

/// Marker written to `changes` for a create.
pub const CREATED_MARKER: &str = "created";
/// Marker written to `changes` for a delete.
pub const DELETED_MARKER: &str = "deleted";
