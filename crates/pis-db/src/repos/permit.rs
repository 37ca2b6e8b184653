//! Permit repository. Listings are ordered by municipality.

use pis_core::describe::EntityRef;
use pis_core::entities::{NewPermit, Permit};
use pis_core::enums::EntityType;

use super::{StoredEntity, check_property_move, ensure_id_free, ensure_property, insert_with_key};
use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::{Mutation, UnitOfWork};
use crate::updates::ColumnValue;
use crate::updates::permit::PermitUpdate;

impl StoredEntity for Permit {
    const ENTITY_TYPE: EntityType = EntityType::Permit;
    const TABLE: &'static str = "permits";
    const KEY: &'static str = "permit_id";
    const COLUMNS: &'static str = "permit_id, property_yardi, municipality, permit_type, permit_number, status, issued_date, expiration_date, notes";

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            permit_id: row.get::<i64>(0)?,
            property_yardi: row.get::<String>(1)?,
            municipality: get_opt_string(row, 2)?,
            permit_type: get_opt_string(row, 3)?,
            permit_number: get_opt_string(row, 4)?,
            status: get_opt_string(row, 5)?,
            issued_date: get_opt_string(row, 6)?,
            expiration_date: get_opt_string(row, 7)?,
            notes: get_opt_string(row, 8)?,
        })
    }

    fn key(&self) -> libsql::Value {
        self.permit_id.into()
    }

    fn display_id(&self) -> String {
        self.permit_id.to_string()
    }

    fn entity_ref(&self) -> EntityRef<'_> {
        EntityRef::Permit(self)
    }
}

impl UnitOfWork {
    /// # Errors
    ///
    /// `Validation` for a blank property, `NotFound` if the property does not
    /// exist, `Conflict` if an explicit `permit_id` is taken.
    pub async fn create_permit(&self, new: NewPermit) -> Result<Mutation<Permit>, DatabaseError> {
        new.validate()?;
        ensure_property(self.conn(), &new.property_yardi).await?;
        ensure_id_free::<Permit>(self.conn(), new.permit_id).await?;

        let explicit = new.permit_id;
        let mut permit = new.into_permit(explicit.unwrap_or_default());
        permit.permit_id = insert_with_key(
            self.conn(),
            "INSERT INTO permits (permit_id, property_yardi, municipality, permit_type, permit_number, status, issued_date, expiration_date, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            vec![
                explicit.to_sql(),
                permit.property_yardi.to_sql(),
                permit.municipality.to_sql(),
                permit.permit_type.to_sql(),
                permit.permit_number.to_sql(),
                permit.status.to_sql(),
                permit.issued_date.to_sql(),
                permit.expiration_date.to_sql(),
                permit.notes.to_sql(),
            ],
            explicit,
        )
        .await?;

        Ok(self.audit_created(permit).await)
    }

    pub async fn get_permit(&self, permit_id: i64) -> Result<Permit, DatabaseError> {
        self.fetch(permit_id.into(), &permit_id).await
    }

    pub async fn list_permits(
        &self,
        property_yardi: Option<&str>,
    ) -> Result<Vec<Permit>, DatabaseError> {
        self.fetch_for_property(property_yardi, "municipality, permit_id").await
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown permit or target property.
    pub async fn update_permit(
        &self,
        permit_id: i64,
        update: PermitUpdate,
    ) -> Result<Mutation<Permit>, DatabaseError> {
        let mut permit = self.get_permit(permit_id).await?;
        check_property_move(
            self.conn(),
            &permit.property_yardi,
            update.property_yardi.as_deref(),
        )
        .await?;
        let changes = update.apply(&mut permit);
        self.commit_changes(permit, changes).await
    }

    pub async fn delete_permit(&self, permit_id: i64) -> Result<Mutation<()>, DatabaseError> {
        let permit = self.get_permit(permit_id).await?;
        self.delete_audited(&permit).await
    }
}
