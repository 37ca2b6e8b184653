//! Utility repository.

use pis_core::describe::EntityRef;
use pis_core::entities::{NewUtility, Utility, WithContacts};
use pis_core::enums::{EntityType, OwnerType};

use super::{StoredEntity, check_property_move, ensure_id_free, ensure_property, insert_with_key};
use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::{Mutation, UnitOfWork};
use crate::updates::ColumnValue;
use crate::updates::utility::UtilityUpdate;

impl StoredEntity for Utility {
    const ENTITY_TYPE: EntityType = EntityType::Utility;
    const TABLE: &'static str = "utilities";
    const KEY: &'static str = "utility_id";
    const COLUMNS: &'static str = "utility_id, property_yardi, service, vendor, contact_info, account_number, meter_number, notes, paid_by";

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            utility_id: row.get::<i64>(0)?,
            property_yardi: row.get::<String>(1)?,
            service: get_opt_string(row, 2)?,
            vendor: get_opt_string(row, 3)?,
            contact_info: get_opt_string(row, 4)?,
            account_number: get_opt_string(row, 5)?,
            meter_number: get_opt_string(row, 6)?,
            notes: get_opt_string(row, 7)?,
            paid_by: get_opt_string(row, 8)?,
        })
    }

    fn key(&self) -> libsql::Value {
        self.utility_id.into()
    }

    fn display_id(&self) -> String {
        self.utility_id.to_string()
    }

    fn entity_ref(&self) -> EntityRef<'_> {
        EntityRef::Utility(self)
    }
}

impl UnitOfWork {
    /// # Errors
    ///
    /// `Validation` for a blank property, `NotFound` if the property does not
    /// exist, `Conflict` if an explicit `utility_id` is taken.
    pub async fn create_utility(&self, new: NewUtility) -> Result<Mutation<Utility>, DatabaseError> {
        new.validate()?;
        ensure_property(self.conn(), &new.property_yardi).await?;
        ensure_id_free::<Utility>(self.conn(), new.utility_id).await?;

        let explicit = new.utility_id;
        let mut utility = new.into_utility(explicit.unwrap_or_default());
        utility.utility_id = insert_with_key(
            self.conn(),
            "INSERT INTO utilities (utility_id, property_yardi, service, vendor, contact_info, account_number, meter_number, notes, paid_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            vec![
                explicit.to_sql(),
                utility.property_yardi.to_sql(),
                utility.service.to_sql(),
                utility.vendor.to_sql(),
                utility.contact_info.to_sql(),
                utility.account_number.to_sql(),
                utility.meter_number.to_sql(),
                utility.notes.to_sql(),
                utility.paid_by.to_sql(),
            ],
            explicit,
        )
        .await?;

        Ok(self.audit_created(utility).await)
    }

    pub async fn get_utility(&self, utility_id: i64) -> Result<Utility, DatabaseError> {
        self.fetch(utility_id.into(), &utility_id).await
    }

    pub async fn list_utilities(
        &self,
        property_yardi: Option<&str>,
    ) -> Result<Vec<Utility>, DatabaseError> {
        self.fetch_for_property(property_yardi, "utility_id").await
    }

    /// Utility with its linked contacts embedded.
    pub async fn get_utility_with_contacts(
        &self,
        utility_id: i64,
    ) -> Result<WithContacts<Utility>, DatabaseError> {
        let item = self.get_utility(utility_id).await?;
        let contacts = self.contacts_for(OwnerType::Utility, utility_id).await?;
        Ok(WithContacts { item, contacts })
    }

    pub async fn list_utilities_with_contacts(
        &self,
        property_yardi: Option<&str>,
    ) -> Result<Vec<WithContacts<Utility>>, DatabaseError> {
        let mut out = Vec::new();
        for item in self.list_utilities(property_yardi).await? {
            let contacts = self.contacts_for(OwnerType::Utility, item.utility_id).await?;
            out.push(WithContacts { item, contacts });
        }
        Ok(out)
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown utility or target property.
    pub async fn update_utility(
        &self,
        utility_id: i64,
        update: UtilityUpdate,
    ) -> Result<Mutation<Utility>, DatabaseError> {
        let mut utility = self.get_utility(utility_id).await?;
        check_property_move(
            self.conn(),
            &utility.property_yardi,
            update.property_yardi.as_deref(),
        )
        .await?;
        let changes = update.apply(&mut utility);
        self.commit_changes(utility, changes).await
    }

    /// Delete a utility. Its contact links go with it through the schema cascade.
    pub async fn delete_utility(&self, utility_id: i64) -> Result<Mutation<()>, DatabaseError> {
        let utility = self.get_utility(utility_id).await?;
        self.delete_audited(&utility).await
    }
}
