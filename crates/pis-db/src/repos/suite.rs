//! Suite repository.

use pis_core::describe::EntityRef;
use pis_core::entities::{NewSuite, Suite, WithContacts};
use pis_core::enums::{EntityType, OwnerType};

use super::{StoredEntity, check_property_move, ensure_id_free, ensure_property, insert_with_key};
use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::{Mutation, UnitOfWork};
use crate::updates::ColumnValue;
use crate::updates::suite::SuiteUpdate;

impl StoredEntity for Suite {
    const ENTITY_TYPE: EntityType = EntityType::Suite;
    const TABLE: &'static str = "suites";
    const KEY: &'static str = "suite_id";
    const COLUMNS: &'static str = "suite_id, property_yardi, suite, sqft, name, contact, phone_number, \
        email_address, notes, hvac, hvac_info, commercial_cafe, door_access_codes, \
        lease_obligations, signage_rights, parking_spaces, electrical_amperage, misc";

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            suite_id: row.get::<i64>(0)?,
            property_yardi: row.get::<String>(1)?,
            suite: get_opt_string(row, 2)?,
            sqft: get_opt_string(row, 3)?,
            name: get_opt_string(row, 4)?,
            contact: get_opt_string(row, 5)?,
            phone_number: get_opt_string(row, 6)?,
            email_address: get_opt_string(row, 7)?,
            notes: get_opt_string(row, 8)?,
            hvac: get_opt_string(row, 9)?,
            hvac_info: get_opt_string(row, 10)?,
            commercial_cafe: get_opt_string(row, 11)?,
            door_access_codes: get_opt_string(row, 12)?,
            lease_obligations: get_opt_string(row, 13)?,
            signage_rights: get_opt_string(row, 14)?,
            parking_spaces: get_opt_string(row, 15)?,
            electrical_amperage: get_opt_string(row, 16)?,
            misc: get_opt_string(row, 17)?,
        })
    }

    fn key(&self) -> libsql::Value {
        self.suite_id.into()
    }

    fn display_id(&self) -> String {
        self.suite_id.to_string()
    }

    fn entity_ref(&self) -> EntityRef<'_> {
        EntityRef::Suite(self)
    }
}

impl UnitOfWork {
    /// Insert a suite under an existing property.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank property, `NotFound` if the property does not
    /// exist, `Conflict` if an explicit `suite_id` is taken.
    pub async fn create_suite(&self, new: NewSuite) -> Result<Mutation<Suite>, DatabaseError> {
        new.validate()?;
        ensure_property(self.conn(), &new.property_yardi).await?;
        ensure_id_free::<Suite>(self.conn(), new.suite_id).await?;

        let explicit = new.suite_id;
        let mut suite = new.into_suite(explicit.unwrap_or_default());
        suite.suite_id = insert_with_key(
            self.conn(),
            "INSERT INTO suites (suite_id, property_yardi, suite, sqft, name, contact, phone_number,
                email_address, notes, hvac, hvac_info, commercial_cafe, door_access_codes,
                lease_obligations, signage_rights, parking_spaces, electrical_amperage, misc)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            vec![
                explicit.to_sql(),
                suite.property_yardi.to_sql(),
                suite.suite.to_sql(),
                suite.sqft.to_sql(),
                suite.name.to_sql(),
                suite.contact.to_sql(),
                suite.phone_number.to_sql(),
                suite.email_address.to_sql(),
                suite.notes.to_sql(),
                suite.hvac.to_sql(),
                suite.hvac_info.to_sql(),
                suite.commercial_cafe.to_sql(),
                suite.door_access_codes.to_sql(),
                suite.lease_obligations.to_sql(),
                suite.signage_rights.to_sql(),
                suite.parking_spaces.to_sql(),
                suite.electrical_amperage.to_sql(),
                suite.misc.to_sql(),
            ],
            explicit,
        )
        .await?;

        Ok(self.audit_created(suite).await)
    }

    pub async fn get_suite(&self, suite_id: i64) -> Result<Suite, DatabaseError> {
        self.fetch(suite_id.into(), &suite_id).await
    }

    pub async fn list_suites(&self, property_yardi: Option<&str>) -> Result<Vec<Suite>, DatabaseError> {
        self.fetch_for_property(property_yardi, "suite_id").await
    }

    /// Suite with its linked contacts embedded.
    pub async fn get_suite_with_contacts(
        &self,
        suite_id: i64,
    ) -> Result<WithContacts<Suite>, DatabaseError> {
        let item = self.get_suite(suite_id).await?;
        let contacts = self.contacts_for(OwnerType::Suite, suite_id).await?;
        Ok(WithContacts { item, contacts })
    }

    pub async fn list_suites_with_contacts(
        &self,
        property_yardi: Option<&str>,
    ) -> Result<Vec<WithContacts<Suite>>, DatabaseError> {
        let mut out = Vec::new();
        for item in self.list_suites(property_yardi).await? {
            let contacts = self.contacts_for(OwnerType::Suite, item.suite_id).await?;
            out.push(WithContacts { item, contacts });
        }
        Ok(out)
    }

    /// Apply the changed fields of `update` and log one edit row per field.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown suite or target property.
    pub async fn update_suite(
        &self,
        suite_id: i64,
        update: SuiteUpdate,
    ) -> Result<Mutation<Suite>, DatabaseError> {
        let mut suite = self.get_suite(suite_id).await?;
        check_property_move(
            self.conn(),
            &suite.property_yardi,
            update.property_yardi.as_deref(),
        )
        .await?;
        let changes = update.apply(&mut suite);
        self.commit_changes(suite, changes).await
    }

    /// Delete a suite. Its contact links go with it through the schema cascade.
    pub async fn delete_suite(&self, suite_id: i64) -> Result<Mutation<()>, DatabaseError> {
        let suite = self.get_suite(suite_id).await?;
        self.delete_audited(&suite).await
    }
}
