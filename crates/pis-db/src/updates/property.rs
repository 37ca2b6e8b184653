//! Property update whitelist. `yardi` is the key and cannot be changed.

use pis_core::entities::Property;

entity_update! {
    PropertyUpdate, PropertyUpdateBuilder for Property {
        address: Option<String>,
        prop_photo: Option<String>,
        city: Option<String>,
        state: Option<String>,
        zip: Option<i64>,
        building_type: Option<String>,
        total_sq_ft: Option<i64>,
        prop_manager: Option<String>,
        coe: Option<String>,
        year_built: Option<String>,
        year_rent: Option<String>,
        num_buildings: Option<String>,
        num_stories: Option<String>,
        apn: Option<String>,
        prop_tax_id: Option<String>,
        parking: Option<String>,
        fire_sprinklers: Option<String>,
        net_rentable_area: Option<String>,
        land_area: Option<String>,
        structural_frame: Option<String>,
        foundation: Option<String>,
        roof_type: Option<String>,
        roof_cover: Option<String>,
        heat_cooling_source: Option<String>,
        misc: Option<String>,
        active: bool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updates::parse_payload;

    #[test]
    fn yardi_is_not_updatable() {
        let err = parse_payload::<PropertyUpdate>(r#"{"yardi":"P2"}"#).unwrap_err();
        assert!(err.to_string().contains("yardi"), "{err}");
    }

    #[test]
    fn null_clears_and_absent_skips() {
        let update: PropertyUpdate = parse_payload(r#"{"address":null,"active":false}"#).unwrap();
        assert_eq!(update.address, Some(None));
        assert_eq!(update.city, None);
        assert_eq!(update.active, Some(false));
    }

    #[test]
    fn active_is_not_nullable() {
        assert!(parse_payload::<PropertyUpdate>(r#"{"active":null}"#).is_err());
    }
}
