//! Access code repository.

use pis_core::describe::EntityRef;
use pis_core::entities::{Code, NewCode};
use pis_core::enums::EntityType;

use super::{StoredEntity, check_property_move, ensure_id_free, ensure_property, insert_with_key};
use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::{Mutation, UnitOfWork};
use crate::updates::ColumnValue;
use crate::updates::code::CodeUpdate;

impl StoredEntity for Code {
    const ENTITY_TYPE: EntityType = EntityType::Code;
    const TABLE: &'static str = "codes";
    const KEY: &'static str = "code_id";
    const COLUMNS: &'static str = "code_id, property_yardi, description, code, notes";

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            code_id: row.get::<i64>(0)?,
            property_yardi: row.get::<String>(1)?,
            description: get_opt_string(row, 2)?,
            code: get_opt_string(row, 3)?,
            notes: get_opt_string(row, 4)?,
        })
    }

    fn key(&self) -> libsql::Value {
        self.code_id.into()
    }

    fn display_id(&self) -> String {
        self.code_id.to_string()
    }

    fn entity_ref(&self) -> EntityRef<'_> {
        EntityRef::Code(self)
    }
}

impl UnitOfWork {
    /// # Errors
    ///
    /// `Validation` for a blank property, `NotFound` if the property does not
    /// exist, `Conflict` if an explicit `code_id` is taken.
    pub async fn create_code(&self, new: NewCode) -> Result<Mutation<Code>, DatabaseError> {
        new.validate()?;
        ensure_property(self.conn(), &new.property_yardi).await?;
        ensure_id_free::<Code>(self.conn(), new.code_id).await?;

        let explicit = new.code_id;
        let mut code = new.into_code(explicit.unwrap_or_default());
        code.code_id = insert_with_key(
            self.conn(),
            "INSERT INTO codes (code_id, property_yardi, description, code, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            vec![
                explicit.to_sql(),
                code.property_yardi.to_sql(),
                code.description.to_sql(),
                code.code.to_sql(),
                code.notes.to_sql(),
            ],
            explicit,
        )
        .await?;

        Ok(self.audit_created(code).await)
    }

    pub async fn get_code(&self, code_id: i64) -> Result<Code, DatabaseError> {
        self.fetch(code_id.into(), &code_id).await
    }

    pub async fn list_codes(
        &self,
        property_yardi: Option<&str>,
    ) -> Result<Vec<Code>, DatabaseError> {
        self.fetch_for_property(property_yardi, "code_id").await
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown code or target property.
    pub async fn update_code(
        &self,
        code_id: i64,
        update: CodeUpdate,
    ) -> Result<Mutation<Code>, DatabaseError> {
        let mut code = self.get_code(code_id).await?;
        check_property_move(
            self.conn(),
            &code.property_yardi,
            update.property_yardi.as_deref(),
        )
        .await?;
        let changes = update.apply(&mut code);
        self.commit_changes(code, changes).await
    }

    pub async fn delete_code(&self, code_id: i64) -> Result<Mutation<()>, DatabaseError> {
        let code = self.get_code(code_id).await?;
        self.delete_audited(&code).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{every_field, history_rows, seed_property, test_uow};
    use crate::updates::parse_payload;
    use crate::updates::code::{CodeUpdate, CodeUpdateBuilder};
    use pis_core::entities::{Code, NewCode};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn label_falls_back_to_code_value() {
        let (_db, uow) = test_uow().await;
        seed_property(&uow, "P1").await;
        let code = uow
            .create_code(NewCode {
                code: Some("4321".into()),
                ..NewCode::for_property("P1")
            })
            .await
            .unwrap()
            .value;

        let update = CodeUpdateBuilder::new().notes(Some("gate".into())).build();
        uow.update_code(code.code_id, update).await.unwrap();

        let rows = history_rows(&uow).await;
        assert_eq!(rows[0].entity_id, format!("{} / 4321", code.code_id));
        assert_eq!(rows[0].changes, "notes (property P1)");
        assert_eq!(rows[0].old_value, "");
        assert_eq!(rows[0].new_value, "gate");
    }

    #[tokio::test]
    async fn every_field_round_trips() {
        let (_db, uow) = test_uow().await;
        seed_property(&uow, "P1").await;
        seed_property(&uow, "P2").await;

        let new: NewCode = serde_json::from_value(every_field::<Code>("P1", "old")).unwrap();
        let id = uow.create_code(new.clone()).await.unwrap().value.code_id;
        assert_eq!(uow.get_code(id).await.unwrap(), new.into_code(id));

        let after = every_field::<Code>("P2", "new");
        let update: CodeUpdate = parse_payload(&after.to_string()).unwrap();
        let updated = uow.update_code(id, update).await.unwrap().value;
        let expected = serde_json::from_value::<NewCode>(after).unwrap().into_code(id);
        assert_eq!(updated, expected);
        assert_eq!(uow.get_code(id).await.unwrap(), expected);
    }
}
