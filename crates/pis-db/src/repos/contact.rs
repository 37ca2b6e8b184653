//! Contact repository.
//!
//! Contacts are standalone; their links to suites, services and utilities
//! are kept in the link relations. Creating a contact with owner ids and
//! deleting a contact both touch those relations inside one transaction.

use pis_core::describe::EntityRef;
use pis_core::entities::{Contact, NewContact};
use pis_core::enums::EntityType;
use tracing::{debug, warn};

use super::link::{insert_link, purge_contact_links};
use super::{StoredEntity, ensure_id_free, insert_with_key};
use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::{AuditStatus, Mutation, UnitOfWork};
use crate::updates::ColumnValue;
use crate::updates::contact::ContactUpdate;

impl StoredEntity for Contact {
    const ENTITY_TYPE: EntityType = EntityType::Contact;
    const TABLE: &'static str = "contacts";
    const KEY: &'static str = "contact_id";
    const COLUMNS: &'static str = "contact_id, name, title, office_number, cell_number, email";

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            contact_id: row.get::<i64>(0)?,
            name: get_opt_string(row, 1)?,
            title: get_opt_string(row, 2)?,
            office_number: get_opt_string(row, 3)?,
            cell_number: get_opt_string(row, 4)?,
            email: get_opt_string(row, 5)?,
        })
    }

    fn key(&self) -> libsql::Value {
        self.contact_id.into()
    }

    fn display_id(&self) -> String {
        self.contact_id.to_string()
    }

    fn entity_ref(&self) -> EntityRef<'_> {
        EntityRef::Contact(self)
    }
}

impl UnitOfWork {
    /// Insert a contact and one link row per supplied owner id.
    ///
    /// The insert and its links share a transaction: a missing owner rolls
    /// back the whole create.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing owner, `Conflict` for a taken explicit id.
    pub async fn create_contact(
        &self,
        new: NewContact,
    ) -> Result<Mutation<Contact>, DatabaseError> {
        new.validate()?;
        ensure_id_free::<Contact>(self.conn(), new.contact_id).await?;

        let owners = new.owners();
        let explicit = new.contact_id;
        let mut contact = new.into_contact(explicit.unwrap_or_default());

        let tx = self.conn().transaction().await?;
        let written = async {
            let id = insert_with_key(
                &tx,
                "INSERT INTO contacts (contact_id, name, title, office_number, cell_number, email)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                vec![
                    explicit.to_sql(),
                    contact.name.to_sql(),
                    contact.title.to_sql(),
                    contact.office_number.to_sql(),
                    contact.cell_number.to_sql(),
                    contact.email.to_sql(),
                ],
                explicit,
            )
            .await?;
            for (owner_type, owner_id) in &owners {
                insert_link(&tx, *owner_type, *owner_id, id).await?;
            }
            Ok::<_, DatabaseError>(id)
        }
        .await;

        match written {
            Ok(id) => {
                tx.commit().await?;
                contact.contact_id = id;
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(%rollback, "contact create rollback failed");
                }
                return Err(e);
            }
        }

        Ok(self.audit_created(contact).await)
    }

    pub async fn get_contact(&self, contact_id: i64) -> Result<Contact, DatabaseError> {
        self.fetch(contact_id.into(), &contact_id).await
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM contacts ORDER BY contact_id",
            Contact::COLUMNS
        );
        let mut rows = self.conn().query(&sql, ()).await?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next().await? {
            contacts.push(Contact::from_row(&row)?);
        }
        Ok(contacts)
    }

    pub async fn update_contact(
        &self,
        contact_id: i64,
        update: ContactUpdate,
    ) -> Result<Mutation<Contact>, DatabaseError> {
        let mut contact = self.get_contact(contact_id).await?;
        let changes = update.apply(&mut contact);
        self.commit_changes(contact, changes).await
    }

    /// Purge every link to the contact, then delete it, in one transaction.
    ///
    /// The `deleted` audit row is appended while the contact is still readable.
    pub async fn delete_contact(&self, contact_id: i64) -> Result<Mutation<()>, DatabaseError> {
        let contact = self.get_contact(contact_id).await?;
        let id = contact.display_id();
        let audited = self
            .audit()
            .record_delete(EntityType::Contact, &id, &contact, Some(contact.entity_ref()))
            .await;

        let tx = self.conn().transaction().await?;
        let removed = async {
            let links = purge_contact_links(&tx, contact_id).await?;
            tx.execute("DELETE FROM contacts WHERE contact_id = ?1", [contact_id])
                .await?;
            Ok::<_, DatabaseError>(links)
        }
        .await;

        match removed {
            Ok(links) => {
                tx.commit().await?;
                debug!(contact_id, links, "contact deleted with its links");
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(%rollback, "contact delete rollback failed");
                }
                return Err(e);
            }
        }

        let status = AuditStatus::from_results(EntityType::Contact, &id, vec![audited]);
        Ok(Mutation::new((), status))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DatabaseError;
    use crate::test_support::helpers::{seed_property, test_uow};
    use pis_core::entities::{NewContact, NewSuite};
    use pis_core::enums::OwnerType;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_with_owner_links_it() {
        let (_db, uow) = test_uow().await;
        seed_property(&uow, "P1").await;
        let suite = uow.create_suite(NewSuite::for_property("P1")).await.unwrap().value;

        let contact = uow
            .create_contact(NewContact {
                suite_id: Some(suite.suite_id),
                ..NewContact::named("Jane")
            })
            .await
            .unwrap()
            .value;

        let linked = uow.contacts_for(OwnerType::Suite, suite.suite_id).await.unwrap();
        assert_eq!(linked, vec![contact]);
    }

    #[tokio::test]
    async fn missing_owner_rolls_back_the_contact() {
        let (_db, uow) = test_uow().await;
        let err = uow
            .create_contact(NewContact {
                contact_id: Some(5),
                utility_id: Some(404),
                ..NewContact::named("Jane")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }), "{err}");
        assert!(uow.get_contact(5).await.is_err());
        assert!(uow.list_contacts().await.unwrap().is_empty());
    }
}
