//! Shared test utilities for pis-db unit tests.

pub(crate) mod helpers {
    use pis_core::entities::{EditHistory, NewProperty};

    use crate::PisDb;
    use crate::repos::StoredEntity;
    use crate::repos::history::HistoryFilter;
    use crate::service::UnitOfWork;

    /// In-memory database plus a unit of work acting as `tester`.
    ///
    /// The handle is returned so it outlives the unit of work.
    pub async fn test_uow() -> (PisDb, UnitOfWork) {
        let db = PisDb::open_in_memory().await.unwrap();
        let uow = db.unit_of_work("tester").await.unwrap();
        (db, uow)
    }

    pub async fn seed_property(uow: &UnitOfWork, yardi: &str) {
        uow.create_property(NewProperty::with_yardi(yardi))
            .await
            .unwrap();
    }

    /// Full history, newest first.
    pub async fn history_rows(uow: &UnitOfWork) -> Vec<EditHistory> {
        uow.history(&HistoryFilter::default()).await.unwrap()
    }

    /// Create or update JSON setting every column of `T` except its key.
    ///
    /// Each column gets a distinct `"{tag} {column}"` value so a misplaced
    /// column shows up in comparisons.
    pub fn every_field<T: StoredEntity>(property_yardi: &str, tag: &str) -> serde_json::Value {
        let fields = T::COLUMNS
            .split(',')
            .map(str::trim)
            .filter(|column| *column != T::KEY)
            .map(|column| {
                let value = if column == "property_yardi" {
                    property_yardi.to_owned()
                } else {
                    format!("{tag} {column}")
                };
                (column.to_owned(), serde_json::Value::String(value))
            })
            .collect();
        serde_json::Value::Object(fields)
    }
}
