//! Property repository, including nested detail reads.

use pis_core::describe::EntityRef;
use pis_core::entities::{NewProperty, Property, PropertyDetail};
use pis_core::enums::EntityType;

use super::{StoredEntity, exists};
use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_i64, get_opt_string};
use crate::service::{Mutation, UnitOfWork};
use crate::updates::ColumnValue;
use crate::updates::property::PropertyUpdate;

/// Tables whose rows keep a property from being deleted.
const CHILD_TABLES: [&str; 6] = [
    "suites",
    "services",
    "utilities",
    "codes",
    "permits",
    "property_photos",
];

impl StoredEntity for Property {
    const ENTITY_TYPE: EntityType = EntityType::Property;
    const TABLE: &'static str = "properties";
    const KEY: &'static str = "yardi";
    const COLUMNS: &'static str = "yardi, address, prop_photo, city, state, zip, building_type, \
        total_sq_ft, prop_manager, coe, year_built, year_rent, num_buildings, num_stories, apn, \
        prop_tax_id, parking, fire_sprinklers, net_rentable_area, land_area, structural_frame, \
        foundation, roof_type, roof_cover, heat_cooling_source, misc, active";

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            yardi: row.get::<String>(0)?,
            address: get_opt_string(row, 1)?,
            prop_photo: get_opt_string(row, 2)?,
            city: get_opt_string(row, 3)?,
            state: get_opt_string(row, 4)?,
            zip: get_opt_i64(row, 5)?,
            building_type: get_opt_string(row, 6)?,
            total_sq_ft: get_opt_i64(row, 7)?,
            prop_manager: get_opt_string(row, 8)?,
            coe: get_opt_string(row, 9)?,
            year_built: get_opt_string(row, 10)?,
            year_rent: get_opt_string(row, 11)?,
            num_buildings: get_opt_string(row, 12)?,
            num_stories: get_opt_string(row, 13)?,
            apn: get_opt_string(row, 14)?,
            prop_tax_id: get_opt_string(row, 15)?,
            parking: get_opt_string(row, 16)?,
            fire_sprinklers: get_opt_string(row, 17)?,
            net_rentable_area: get_opt_string(row, 18)?,
            land_area: get_opt_string(row, 19)?,
            structural_frame: get_opt_string(row, 20)?,
            foundation: get_opt_string(row, 21)?,
            roof_type: get_opt_string(row, 22)?,
            roof_cover: get_opt_string(row, 23)?,
            heat_cooling_source: get_opt_string(row, 24)?,
            misc: get_opt_string(row, 25)?,
            active: get_bool(row, 26)?,
        })
    }

    fn key(&self) -> libsql::Value {
        self.yardi.as_str().into()
    }

    fn display_id(&self) -> String {
        self.yardi.clone()
    }

    fn entity_ref(&self) -> EntityRef<'_> {
        EntityRef::Property(self)
    }
}

impl UnitOfWork {
    /// # Errors
    ///
    /// `Validation` for a blank Yardi code, `Conflict` if it already exists.
    pub async fn create_property(
        &self,
        new: NewProperty,
    ) -> Result<Mutation<Property>, DatabaseError> {
        new.validate()?;
        if exists(self.conn(), "properties", "yardi", new.yardi.as_str().into()).await? {
            return Err(DatabaseError::Conflict(format!(
                "property {} already exists",
                new.yardi
            )));
        }

        let p = new.into_property();
        let params = vec![
            p.yardi.to_sql(),
            p.address.to_sql(),
            p.prop_photo.to_sql(),
            p.city.to_sql(),
            p.state.to_sql(),
            p.zip.to_sql(),
            p.building_type.to_sql(),
            p.total_sq_ft.to_sql(),
            p.prop_manager.to_sql(),
            p.coe.to_sql(),
            p.year_built.to_sql(),
            p.year_rent.to_sql(),
            p.num_buildings.to_sql(),
            p.num_stories.to_sql(),
            p.apn.to_sql(),
            p.prop_tax_id.to_sql(),
            p.parking.to_sql(),
            p.fire_sprinklers.to_sql(),
            p.net_rentable_area.to_sql(),
            p.land_area.to_sql(),
            p.structural_frame.to_sql(),
            p.foundation.to_sql(),
            p.roof_type.to_sql(),
            p.roof_cover.to_sql(),
            p.heat_cooling_source.to_sql(),
            p.misc.to_sql(),
            p.active.to_sql(),
        ];
        let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO properties ({}) VALUES ({})",
            Property::COLUMNS,
            placeholders.join(", ")
        );
        self.conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        Ok(self.audit_created(p).await)
    }

    pub async fn get_property(&self, yardi: &str) -> Result<Property, DatabaseError> {
        self.fetch(yardi.into(), &yardi).await
    }

    pub async fn list_properties(&self) -> Result<Vec<Property>, DatabaseError> {
        let sql = format!("SELECT {} FROM properties ORDER BY yardi", Property::COLUMNS);
        let mut rows = self.conn().query(&sql, ()).await?;
        let mut properties = Vec::new();
        while let Some(row) = rows.next().await? {
            properties.push(Property::from_row(&row)?);
        }
        Ok(properties)
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown property.
    pub async fn update_property(
        &self,
        yardi: &str,
        update: PropertyUpdate,
    ) -> Result<Mutation<Property>, DatabaseError> {
        let mut property = self.get_property(yardi).await?;
        let changes = update.apply(&mut property);
        self.commit_changes(property, changes).await
    }

    /// Delete a property that no longer has any child rows.
    ///
    /// # Errors
    ///
    /// `Conflict` naming the child tables that still reference it.
    pub async fn delete_property(&self, yardi: &str) -> Result<Mutation<()>, DatabaseError> {
        let property = self.get_property(yardi).await?;

        let mut blocking = Vec::new();
        for table in CHILD_TABLES {
            if exists(self.conn(), table, "property_yardi", yardi.into()).await? {
                blocking.push(table);
            }
        }
        if !blocking.is_empty() {
            return Err(DatabaseError::Conflict(format!(
                "property {yardi} still has rows in {}",
                blocking.join(", ")
            )));
        }

        self.delete_audited(&property).await
    }

    /// A property with every child record nested under it.
    pub async fn get_property_detail(&self, yardi: &str) -> Result<PropertyDetail, DatabaseError> {
        let property = self.get_property(yardi).await?;
        self.assemble_detail(property).await
    }

    pub async fn list_property_details(&self) -> Result<Vec<PropertyDetail>, DatabaseError> {
        let mut details = Vec::new();
        for property in self.list_properties().await? {
            details.push(self.assemble_detail(property).await?);
        }
        Ok(details)
    }

    async fn assemble_detail(&self, property: Property) -> Result<PropertyDetail, DatabaseError> {
        let yardi = Some(property.yardi.as_str());
        Ok(PropertyDetail {
            suites: self.list_suites_with_contacts(yardi).await?,
            services: self.list_services_with_contacts(yardi).await?,
            utilities: self.list_utilities_with_contacts(yardi).await?,
            codes: self.list_codes(yardi).await?,
            permits: self.list_permits(yardi).await?,
            photos: self.list_photos(yardi).await?,
            property,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DatabaseError;
    use crate::test_support::helpers::{history_rows, test_uow};
    use crate::updates::property::PropertyUpdateBuilder;
    use pis_core::entities::NewProperty;
    use pis_core::enums::AuditAction;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (_db, uow) = test_uow().await;
        let new = NewProperty {
            address: Some("1 Main St".into()),
            zip: Some(85001),
            total_sq_ft: Some(12_000),
            active: Some(false),
            ..NewProperty::with_yardi("P1")
        };
        let created = uow.create_property(new.clone()).await.unwrap().value;
        let fetched = uow.get_property("P1").await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched, new.into_property());
    }

    #[tokio::test]
    async fn duplicate_yardi_conflicts() {
        let (_db, uow) = test_uow().await;
        uow.create_property(NewProperty::with_yardi("P1")).await.unwrap();
        let err = uow
            .create_property(NewProperty::with_yardi("P1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)), "{err}");
    }

    #[tokio::test]
    async fn property_edits_have_no_context_suffix() {
        let (_db, uow) = test_uow().await;
        uow.create_property(NewProperty::with_yardi("P1")).await.unwrap();

        let update = PropertyUpdateBuilder::new()
            .city(Some("Phoenix".into()))
            .active(false)
            .build();
        let outcome = uow.update_property("P1", update).await.unwrap();
        assert_eq!(outcome.audit.entries(), 2);

        let rows = history_rows(&uow).await;
        let edits: Vec<_> = rows
            .iter()
            .filter(|r| r.action == AuditAction::Edit)
            .map(|r| (r.changes.as_str(), r.old_value.as_str(), r.new_value.as_str()))
            .collect();
        assert!(edits.contains(&("city", "", "Phoenix")));
        assert!(edits.contains(&("active", "true", "false")));
        assert!(rows.iter().all(|r| r.entity_id == "P1 / P1"));
    }

    #[tokio::test]
    async fn delete_without_children_is_audited() {
        let (_db, uow) = test_uow().await;
        uow.create_property(NewProperty::with_yardi("P1")).await.unwrap();
        uow.delete_property("P1").await.unwrap();

        assert!(matches!(
            uow.get_property("P1").await.unwrap_err(),
            DatabaseError::NotFound { .. }
        ));
        let rows = history_rows(&uow).await;
        assert_eq!(rows[0].action, AuditAction::Delete);
        assert_eq!(rows[0].changes, "deleted");
    }
}
