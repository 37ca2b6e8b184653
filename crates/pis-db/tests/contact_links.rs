//! Contact link registry behaviour: fan-out reads, duplication, cascades
//! and orphans.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use pis_core::entities::{NewContact, NewProperty, NewSuite, NewUtility};
use pis_core::enums::{AuditAction, EntityType, OwnerType};
use pis_db::PisDb;
use pis_db::error::DatabaseError;
use pis_db::repos::history::HistoryFilter;
use pis_db::service::UnitOfWork;

async fn setup(dir: &TempDir) -> (PisDb, UnitOfWork) {
    let path = dir.path().join("pis.db");
    let db = PisDb::open_local(path.to_str().unwrap()).await.unwrap();
    let uow = db.unit_of_work("alice").await.unwrap();
    uow.create_property(NewProperty::with_yardi("P1")).await.unwrap();
    uow.create_suite(NewSuite {
        suite_id: Some(1),
        suite: Some("101".into()),
        ..NewSuite::for_property("P1")
    })
    .await
    .unwrap();
    (db, uow)
}

async fn link_rows(uow: &UnitOfWork, table: &str) -> i64 {
    let mut rows = uow
        .conn()
        .query(&format!("SELECT COUNT(*) FROM {table}"), ())
        .await
        .unwrap();
    rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
}

#[tokio::test]
async fn linked_contact_is_returned_for_its_suite() {
    let dir = TempDir::new().unwrap();
    let (_db, uow) = setup(&dir).await;

    uow.create_contact(NewContact {
        contact_id: Some(5),
        ..NewContact::named("Jane")
    })
    .await
    .unwrap();
    uow.link(OwnerType::Suite, 1, 5).await.unwrap();

    let contacts = uow.contacts_for(OwnerType::Suite, 1).await.unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name.as_deref(), Some("Jane"));

    let with = uow.get_suite_with_contacts(1).await.unwrap();
    assert_eq!(with.contacts, contacts);
}

#[tokio::test]
async fn linking_twice_stores_two_rows() {
    let dir = TempDir::new().unwrap();
    let (_db, uow) = setup(&dir).await;
    uow.create_contact(NewContact {
        contact_id: Some(5),
        ..NewContact::named("Jane")
    })
    .await
    .unwrap();

    let first = uow.link(OwnerType::Suite, 1, 5).await.unwrap();
    let second = uow.link(OwnerType::Suite, 1, 5).await.unwrap();
    assert_ne!(first.link_id, second.link_id);

    let contacts = uow.contacts_for(OwnerType::Suite, 1).await.unwrap();
    assert_eq!(contacts.len(), 2);
    assert!(contacts.iter().all(|c| c.contact_id == 5));
}

#[tokio::test]
async fn one_contact_can_belong_to_several_owner_types() {
    let dir = TempDir::new().unwrap();
    let (_db, uow) = setup(&dir).await;
    let utility = uow
        .create_utility(NewUtility::for_property("P1"))
        .await
        .unwrap()
        .value;

    let contact = uow
        .create_contact(NewContact {
            suite_id: Some(1),
            utility_id: Some(utility.utility_id),
            ..NewContact::named("Jane")
        })
        .await
        .unwrap()
        .value;

    assert_eq!(uow.contacts_for(OwnerType::Suite, 1).await.unwrap(), vec![contact.clone()]);
    assert_eq!(
        uow.contacts_for(OwnerType::Utility, utility.utility_id).await.unwrap(),
        vec![contact.clone()]
    );
    assert_eq!(uow.links_for_contact(contact.contact_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn deleting_a_suite_cascades_its_links() {
    let dir = TempDir::new().unwrap();
    let (_db, uow) = setup(&dir).await;
    uow.create_contact(NewContact {
        contact_id: Some(5),
        suite_id: Some(1),
        ..NewContact::named("Jane")
    })
    .await
    .unwrap();
    assert_eq!(link_rows(&uow, "suite_contacts").await, 1);

    uow.delete_suite(1).await.unwrap();

    assert_eq!(link_rows(&uow, "suite_contacts").await, 0);
    assert!(uow.get_contact(5).await.is_ok(), "contact itself survives");
}

#[tokio::test]
async fn raw_contact_delete_leaves_orphans() {
    let dir = TempDir::new().unwrap();
    let (_db, uow) = setup(&dir).await;
    uow.create_contact(NewContact {
        contact_id: Some(5),
        suite_id: Some(1),
        ..NewContact::named("Jane")
    })
    .await
    .unwrap();

    uow.conn()
        .execute("DELETE FROM contacts WHERE contact_id = 5", ())
        .await
        .unwrap();

    assert_eq!(link_rows(&uow, "suite_contacts").await, 1);
    assert_eq!(uow.orphan_link_count().await.unwrap(), 1);
    assert!(uow.contacts_for(OwnerType::Suite, 1).await.unwrap().is_empty());

    assert_eq!(uow.unlink_all_for_contact(5).await.unwrap(), 1);
    assert_eq!(uow.orphan_link_count().await.unwrap(), 0);
}

#[tokio::test]
async fn new_contact_does_not_inherit_orphan_links() {
    let dir = TempDir::new().unwrap();
    let (_db, uow) = setup(&dir).await;
    let jane = uow
        .create_contact(NewContact {
            suite_id: Some(1),
            ..NewContact::named("Jane")
        })
        .await
        .unwrap()
        .value;
    uow.conn()
        .execute(
            "DELETE FROM contacts WHERE contact_id = ?1",
            libsql::params![jane.contact_id],
        )
        .await
        .unwrap();

    let bob = uow.create_contact(NewContact::named("Bob")).await.unwrap().value;
    assert_ne!(bob.contact_id, jane.contact_id);
    assert!(uow.contacts_for(OwnerType::Suite, 1).await.unwrap().is_empty());
    assert!(uow.links_for_contact(bob.contact_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn zero_owner_id_is_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    let (_db, uow) = setup(&dir).await;
    let err = uow
        .create_contact(NewContact {
            suite_id: Some(0),
            ..NewContact::named("Jane")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Validation(_)), "{err}");
    assert!(uow.list_contacts().await.unwrap().is_empty());
    assert_eq!(link_rows(&uow, "suite_contacts").await, 0);
}

#[tokio::test]
async fn delete_contact_purges_links_first() {
    let dir = TempDir::new().unwrap();
    let (_db, uow) = setup(&dir).await;
    uow.create_contact(NewContact {
        contact_id: Some(5),
        suite_id: Some(1),
        ..NewContact::named("Jane")
    })
    .await
    .unwrap();
    uow.link(OwnerType::Suite, 1, 5).await.unwrap();

    let outcome = uow.delete_contact(5).await.unwrap();
    assert_eq!(outcome.audit.entries(), 1);

    assert_eq!(link_rows(&uow, "suite_contacts").await, 0);
    assert_eq!(uow.orphan_link_count().await.unwrap(), 0);

    let rows = uow
        .history(&HistoryFilter {
            entity_type: Some(EntityType::Contact),
            action: Some(AuditAction::Delete),
            ..HistoryFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].entity_id, "5 / Jane");
    assert_eq!(rows[0].changes, "deleted", "contacts carry no property context");
}
