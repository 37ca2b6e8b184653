//! Audit logger for `edit_history`.
//!
//! Builds one row per field change or lifecycle event using the change
//! describer, then appends it with its own autocommitted INSERT. The logger
//! never detects no-ops; callers only invoke `record_edit` for fields whose
//! value actually changed.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use pis_core::describe::{EntityRef, contextualize_field, format_entity_display, resolve_label};
use pis_core::entities::{CREATED_MARKER, DELETED_MARKER};
use pis_core::enums::{AuditAction, EntityType};

use crate::error::DatabaseError;
use crate::helpers::to_compact_json;

/// A fully described audit row, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub entity_type: EntityType,
    pub entity_id: String,
    pub changes: String,
    pub old_value: String,
    pub new_value: String,
    pub action: AuditAction,
}

impl AuditRecord {
    #[must_use]
    pub fn edit(
        entity_type: EntityType,
        entity_id: &str,
        field: &str,
        old_value: &str,
        new_value: &str,
        entity: Option<EntityRef<'_>>,
    ) -> Self {
        Self::described(entity_type, entity_id, field, entity, AuditAction::Edit)
            .with_values(old_value, new_value)
    }

    #[must_use]
    pub fn create(
        entity_type: EntityType,
        entity_id: &str,
        snapshot: &str,
        entity: Option<EntityRef<'_>>,
    ) -> Self {
        Self::described(entity_type, entity_id, CREATED_MARKER, entity, AuditAction::Add)
            .with_values("", snapshot)
    }

    #[must_use]
    pub fn delete(
        entity_type: EntityType,
        entity_id: &str,
        snapshot: &str,
        entity: Option<EntityRef<'_>>,
    ) -> Self {
        Self::described(entity_type, entity_id, DELETED_MARKER, entity, AuditAction::Delete)
            .with_values(snapshot, "")
    }

    fn described(
        entity_type: EntityType,
        entity_id: &str,
        changes: &str,
        entity: Option<EntityRef<'_>>,
        action: AuditAction,
    ) -> Self {
        let label = resolve_label(entity);
        Self {
            entity_type,
            entity_id: format_entity_display(entity_id, label.as_deref()),
            changes: contextualize_field(entity, changes),
            old_value: String::new(),
            new_value: String::new(),
            action,
        }
    }

    fn with_values(mut self, old_value: &str, new_value: &str) -> Self {
        old_value.clone_into(&mut self.old_value);
        new_value.clone_into(&mut self.new_value);
        self
    }
}

/// Appends audit rows as one actor.
pub struct AuditLogger<'a> {
    conn: &'a libsql::Connection,
    actor: &'a str,
}

impl<'a> AuditLogger<'a> {
    pub(crate) const fn new(conn: &'a libsql::Connection, actor: &'a str) -> Self {
        Self { conn, actor }
    }

    /// Record one changed field.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn record_edit(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        field: &str,
        old_value: &str,
        new_value: &str,
        entity: Option<EntityRef<'_>>,
    ) -> Result<(), DatabaseError> {
        let record = AuditRecord::edit(entity_type, entity_id, field, old_value, new_value, entity);
        self.append(&record).await
    }

    /// Record a create with the created instance as `new_value`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if serialization or the INSERT fails.
    pub async fn record_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        created: &T,
        entity: Option<EntityRef<'_>>,
    ) -> Result<(), DatabaseError> {
        let snapshot = to_compact_json(created)?;
        let record = AuditRecord::create(entity_type, entity_id, &snapshot, entity);
        self.append(&record).await
    }

    /// Record a delete with the pre-delete instance as `old_value`.
    ///
    /// Must run while the row is still readable.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if serialization or the INSERT fails.
    pub async fn record_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        deleted: &T,
        entity: Option<EntityRef<'_>>,
    ) -> Result<(), DatabaseError> {
        let snapshot = to_compact_json(deleted)?;
        let record = AuditRecord::delete(entity_type, entity_id, &snapshot, entity);
        self.append(&record).await
    }

    /// Persist one row, stamped with the current UTC time.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append(&self, record: &AuditRecord) -> Result<(), DatabaseError> {
        let edited_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        self.conn
            .execute(
                "INSERT INTO edit_history (edited_by, edited_at, entity_type, entity_id, changes, old_value, new_value, action)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    self.actor,
                    edited_at,
                    record.entity_type.as_str(),
                    record.entity_id.as_str(),
                    record.changes.as_str(),
                    record.old_value.as_str(),
                    record.new_value.as_str(),
                    record.action.as_str()
                ],
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pis_core::entities::{Contact, NewContact, NewSuite, Suite};
    use pretty_assertions::assert_eq;

    fn suite() -> Suite {
        NewSuite {
            suite: Some("101".into()),
            ..NewSuite::for_property("P1")
        }
        .into_suite(1)
    }

    #[test]
    fn edit_record_carries_label_and_context() {
        let s = suite();
        let record = AuditRecord::edit(EntityType::Suite, "1", "suite", "101", "102", Some((&s).into()));
        assert_eq!(
            record,
            AuditRecord {
                entity_type: EntityType::Suite,
                entity_id: "1 / 101".into(),
                changes: "suite (property P1)".into(),
                old_value: "101".into(),
                new_value: "102".into(),
                action: AuditAction::Edit,
            }
        );
    }

    #[test]
    fn create_and_delete_mirror_each_other() {
        let s = suite();
        let create = AuditRecord::create(EntityType::Suite, "1", "{}", Some((&s).into()));
        assert_eq!(create.changes, "created (property P1)");
        assert_eq!((create.old_value.as_str(), create.new_value.as_str()), ("", "{}"));
        assert_eq!(create.action, AuditAction::Add);

        let delete = AuditRecord::delete(EntityType::Suite, "1", "{}", Some((&s).into()));
        assert_eq!(delete.changes, "deleted (property P1)");
        assert_eq!((delete.old_value.as_str(), delete.new_value.as_str()), ("{}", ""));
        assert_eq!(delete.action, AuditAction::Delete);
    }

    #[test]
    fn unlabeled_contact_uses_bare_id_without_context() {
        let contact: Contact = NewContact::default().into_contact(5);
        let record = AuditRecord::create(EntityType::Contact, "5", "{}", Some((&contact).into()));
        assert_eq!(record.entity_id, "5");
        assert_eq!(record.changes, "created");
    }

    #[test]
    fn absent_instance_never_fails() {
        let record = AuditRecord::delete(EntityType::Code, "9", "", None);
        assert_eq!(record.entity_id, "9");
        assert_eq!(record.changes, "deleted");
    }
}
