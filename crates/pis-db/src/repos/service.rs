//! Service repository.

use pis_core::describe::EntityRef;
use pis_core::entities::{NewService, Service, WithContacts};
use pis_core::enums::{EntityType, OwnerType};

use super::{StoredEntity, check_property_move, ensure_id_free, ensure_property, insert_with_key};
use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::{Mutation, UnitOfWork};
use crate::updates::ColumnValue;
use crate::updates::service::ServiceUpdate;

impl StoredEntity for Service {
    const ENTITY_TYPE: EntityType = EntityType::Service;
    const TABLE: &'static str = "services";
    const KEY: &'static str = "service_id";
    const COLUMNS: &'static str = "service_id, property_yardi, service_type, vendor, contact, phone_number, email_address, notes, paid_by, tenant_specifics, suite_specifics";

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            service_id: row.get::<i64>(0)?,
            property_yardi: row.get::<String>(1)?,
            service_type: get_opt_string(row, 2)?,
            vendor: get_opt_string(row, 3)?,
            contact: get_opt_string(row, 4)?,
            phone_number: get_opt_string(row, 5)?,
            email_address: get_opt_string(row, 6)?,
            notes: get_opt_string(row, 7)?,
            paid_by: get_opt_string(row, 8)?,
            tenant_specifics: get_opt_string(row, 9)?,
            suite_specifics: get_opt_string(row, 10)?,
        })
    }

    fn key(&self) -> libsql::Value {
        self.service_id.into()
    }

    fn display_id(&self) -> String {
        self.service_id.to_string()
    }

    fn entity_ref(&self) -> EntityRef<'_> {
        EntityRef::Service(self)
    }
}

impl UnitOfWork {
    /// # Errors
    ///
    /// `Validation` for a blank property, `NotFound` if the property does not
    /// exist, `Conflict` if an explicit `service_id` is taken.
    pub async fn create_service(&self, new: NewService) -> Result<Mutation<Service>, DatabaseError> {
        new.validate()?;
        ensure_property(self.conn(), &new.property_yardi).await?;
        ensure_id_free::<Service>(self.conn(), new.service_id).await?;

        let explicit = new.service_id;
        let mut service = new.into_service(explicit.unwrap_or_default());
        service.service_id = insert_with_key(
            self.conn(),
            "INSERT INTO services (service_id, property_yardi, service_type, vendor, contact, phone_number, email_address, notes, paid_by, tenant_specifics, suite_specifics)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            vec![
                explicit.to_sql(),
                service.property_yardi.to_sql(),
                service.service_type.to_sql(),
                service.vendor.to_sql(),
                service.contact.to_sql(),
                service.phone_number.to_sql(),
                service.email_address.to_sql(),
                service.notes.to_sql(),
                service.paid_by.to_sql(),
                service.tenant_specifics.to_sql(),
                service.suite_specifics.to_sql(),
            ],
            explicit,
        )
        .await?;

        Ok(self.audit_created(service).await)
    }

    pub async fn get_service(&self, service_id: i64) -> Result<Service, DatabaseError> {
        self.fetch(service_id.into(), &service_id).await
    }

    pub async fn list_services(
        &self,
        property_yardi: Option<&str>,
    ) -> Result<Vec<Service>, DatabaseError> {
        self.fetch_for_property(property_yardi, "service_id").await
    }

    /// Service with its linked contacts embedded.
    pub async fn get_service_with_contacts(
        &self,
        service_id: i64,
    ) -> Result<WithContacts<Service>, DatabaseError> {
        let item = self.get_service(service_id).await?;
        let contacts = self.contacts_for(OwnerType::Service, service_id).await?;
        Ok(WithContacts { item, contacts })
    }

    pub async fn list_services_with_contacts(
        &self,
        property_yardi: Option<&str>,
    ) -> Result<Vec<WithContacts<Service>>, DatabaseError> {
        let mut out = Vec::new();
        for item in self.list_services(property_yardi).await? {
            let contacts = self.contacts_for(OwnerType::Service, item.service_id).await?;
            out.push(WithContacts { item, contacts });
        }
        Ok(out)
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown service or target property.
    pub async fn update_service(
        &self,
        service_id: i64,
        update: ServiceUpdate,
    ) -> Result<Mutation<Service>, DatabaseError> {
        let mut service = self.get_service(service_id).await?;
        check_property_move(
            self.conn(),
            &service.property_yardi,
            update.property_yardi.as_deref(),
        )
        .await?;
        let changes = update.apply(&mut service);
        self.commit_changes(service, changes).await
    }

    /// Delete a service. Its contact links go with it through the schema cascade.
    pub async fn delete_service(&self, service_id: i64) -> Result<Mutation<()>, DatabaseError> {
        let service = self.get_service(service_id).await?;
        self.delete_audited(&service).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{every_field, seed_property, test_uow};
    use crate::updates::parse_payload;
    use crate::updates::service::ServiceUpdate;
    use pis_core::entities::{NewService, Service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn every_field_round_trips() {
        let (_db, uow) = test_uow().await;
        seed_property(&uow, "P1").await;
        seed_property(&uow, "P2").await;

        let new: NewService = serde_json::from_value(every_field::<Service>("P1", "old")).unwrap();
        let id = uow.create_service(new.clone()).await.unwrap().value.service_id;
        assert_eq!(uow.get_service(id).await.unwrap(), new.into_service(id));

        let after = every_field::<Service>("P2", "new");
        let update: ServiceUpdate = parse_payload(&after.to_string()).unwrap();
        let updated = uow.update_service(id, update).await.unwrap().value;
        let expected = serde_json::from_value::<NewService>(after).unwrap().into_service(id);
        assert_eq!(updated, expected);
        assert_eq!(uow.get_service(id).await.unwrap(), expected);
    }
}
