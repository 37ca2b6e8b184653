//! Contact link registry.
//!
//! Three junction tables, one per owner type. Linking is not idempotent:
//! linking the same pair twice stores two rows, and the fan-out read then
//! returns the contact twice. Deleting an owner cascades its rows at the
//! schema level; the contact side has no constraint, so a contact must be
//! unlinked before it is removed.

use pis_core::entities::{Contact, ContactLink};
use pis_core::enums::{EntityType, OwnerType};

use super::{StoredEntity, exists};
use crate::error::DatabaseError;
use crate::service::UnitOfWork;

/// Insert one link row after checking both endpoints exist.
pub(crate) async fn insert_link(
    conn: &libsql::Connection,
    owner_type: OwnerType,
    owner_id: i64,
    contact_id: i64,
) -> Result<i64, DatabaseError> {
    let owner_column = owner_type.owner_column();
    if !exists(conn, owner_type.owner_table(), owner_column, owner_id.into()).await? {
        return Err(DatabaseError::not_found(owner_type.as_str(), owner_id));
    }
    if !exists(conn, Contact::TABLE, Contact::KEY, contact_id.into()).await? {
        return Err(DatabaseError::not_found(EntityType::Contact.as_str(), contact_id));
    }

    conn.execute(
        &format!(
            "INSERT INTO {} ({owner_column}, contact_id) VALUES (?1, ?2)",
            owner_type.link_table()
        ),
        libsql::params![owner_id, contact_id],
    )
    .await?;
    Ok(conn.last_insert_rowid())
}

/// Remove the contact from all three relations. Returns rows removed.
pub(crate) async fn purge_contact_links(
    conn: &libsql::Connection,
    contact_id: i64,
) -> Result<u64, DatabaseError> {
    let mut removed = 0;
    for owner_type in OwnerType::ALL {
        removed += conn
            .execute(
                &format!(
                    "DELETE FROM {} WHERE contact_id = ?1",
                    owner_type.link_table()
                ),
                [contact_id],
            )
            .await?;
    }
    Ok(removed)
}

fn row_to_link(owner_type: OwnerType, row: &libsql::Row) -> Result<ContactLink, DatabaseError> {
    Ok(ContactLink {
        link_id: row.get::<i64>(0)?,
        owner_type,
        owner_id: row.get::<i64>(1)?,
        contact_id: row.get::<i64>(2)?,
    })
}

impl UnitOfWork {
    /// Link a contact to an owner.
    ///
    /// # Errors
    ///
    /// `NotFound` if either the owner or the contact does not exist.
    pub async fn link(
        &self,
        owner_type: OwnerType,
        owner_id: i64,
        contact_id: i64,
    ) -> Result<ContactLink, DatabaseError> {
        let link_id = insert_link(self.conn(), owner_type, owner_id, contact_id).await?;
        Ok(ContactLink {
            link_id,
            owner_type,
            owner_id,
            contact_id,
        })
    }

    /// Remove every link row between this owner and contact.
    pub async fn unlink(
        &self,
        owner_type: OwnerType,
        owner_id: i64,
        contact_id: i64,
    ) -> Result<u64, DatabaseError> {
        let removed = self
            .conn()
            .execute(
                &format!(
                    "DELETE FROM {} WHERE {} = ?1 AND contact_id = ?2",
                    owner_type.link_table(),
                    owner_type.owner_column()
                ),
                libsql::params![owner_id, contact_id],
            )
            .await?;
        Ok(removed)
    }

    pub async fn unlink_all_for_contact(&self, contact_id: i64) -> Result<u64, DatabaseError> {
        purge_contact_links(self.conn(), contact_id).await
    }

    /// Contacts linked to an owner, one entry per link row.
    ///
    /// Order is unspecified. An owner with no links yields an empty list.
    pub async fn contacts_for(
        &self,
        owner_type: OwnerType,
        owner_id: i64,
    ) -> Result<Vec<Contact>, DatabaseError> {
        let columns = Contact::COLUMNS
            .split(", ")
            .map(|c| format!("c.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {columns} FROM {} l JOIN contacts c ON c.contact_id = l.contact_id
             WHERE l.{} = ?1",
            owner_type.link_table(),
            owner_type.owner_column()
        );
        let mut rows = self.conn().query(&sql, [owner_id]).await?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next().await? {
            contacts.push(Contact::from_row(&row)?);
        }
        Ok(contacts)
    }

    /// Every link row that points at a contact, across all owner types.
    pub async fn links_for_contact(
        &self,
        contact_id: i64,
    ) -> Result<Vec<ContactLink>, DatabaseError> {
        let mut links = Vec::new();
        for owner_type in OwnerType::ALL {
            let sql = format!(
                "SELECT link_id, {}, contact_id FROM {} WHERE contact_id = ?1 ORDER BY link_id",
                owner_type.owner_column(),
                owner_type.link_table()
            );
            let mut rows = self.conn().query(&sql, [contact_id]).await?;
            while let Some(row) = rows.next().await? {
                links.push(row_to_link(owner_type, &row)?);
            }
        }
        Ok(links)
    }

    /// Link rows whose contact no longer exists.
    pub async fn orphan_link_count(&self) -> Result<u64, DatabaseError> {
        let mut total = 0;
        for owner_type in OwnerType::ALL {
            let sql = format!(
                "SELECT COUNT(*) FROM {} l
                 WHERE NOT EXISTS (SELECT 1 FROM contacts c WHERE c.contact_id = l.contact_id)",
                owner_type.link_table()
            );
            let mut rows = self.conn().query(&sql, ()).await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            total += u64::try_from(row.get::<i64>(0)?).unwrap_or(0);
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DatabaseError;
    use crate::test_support::helpers::{seed_property, test_uow};
    use pis_core::entities::{NewContact, NewService};
    use pis_core::enums::OwnerType;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[tokio::test]
    async fn link_to_missing_contact_is_not_found() {
        let (_db, uow) = test_uow().await;
        seed_property(&uow, "P1").await;
        let service = uow.create_service(NewService::for_property("P1")).await.unwrap().value;

        let err = uow.link(OwnerType::Service, service.service_id, 99).await.unwrap_err();
        assert!(
            matches!(&err, DatabaseError::NotFound { entity_type, .. } if entity_type == "contact"),
            "{err}"
        );
    }

    #[rstest]
    #[case::suite(OwnerType::Suite)]
    #[case::service(OwnerType::Service)]
    #[case::utility(OwnerType::Utility)]
    #[tokio::test]
    async fn link_to_missing_owner_is_not_found(#[case] owner_type: OwnerType) {
        let (_db, uow) = test_uow().await;
        let contact = uow.create_contact(NewContact::named("Jane")).await.unwrap().value;
        let err = uow.link(owner_type, 3, contact.contact_id).await.unwrap_err();
        assert!(
            matches!(&err, DatabaseError::NotFound { entity_type, .. } if entity_type == owner_type.as_str()),
            "{err}"
        );
    }

    #[tokio::test]
    async fn unlink_removes_every_duplicate() {
        let (_db, uow) = test_uow().await;
        seed_property(&uow, "P1").await;
        let service = uow.create_service(NewService::for_property("P1")).await.unwrap().value;
        let contact = uow.create_contact(NewContact::named("Jane")).await.unwrap().value;

        uow.link(OwnerType::Service, service.service_id, contact.contact_id).await.unwrap();
        uow.link(OwnerType::Service, service.service_id, contact.contact_id).await.unwrap();

        let removed = uow
            .unlink(OwnerType::Service, service.service_id, contact.contact_id)
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert!(uow
            .contacts_for(OwnerType::Service, service.service_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn links_for_contact_spans_owner_types() {
        let (_db, uow) = test_uow().await;
        seed_property(&uow, "P1").await;
        let service = uow.create_service(NewService::for_property("P1")).await.unwrap().value;
        let contact = uow
            .create_contact(NewContact {
                service_id: Some(service.service_id),
                ..NewContact::named("Jane")
            })
            .await
            .unwrap()
            .value;

        let links = uow.links_for_contact(contact.contact_id).await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].owner_type, OwnerType::Service);
        assert_eq!(links[0].owner_id, service.service_id);
    }
}
