//! Suite update whitelist.

use pis_core::entities::Suite;

entity_update! {
    /// Moving a suite to another property is allowed; the target must exist.
    SuiteUpdate, SuiteUpdateBuilder for Suite {
        property_yardi: String,
        suite: Option<String>,
        sqft: Option<String>,
        name: Option<String>,
        contact: Option<String>,
        phone_number: Option<String>,
        email_address: Option<String>,
        notes: Option<String>,
        hvac: Option<String>,
        hvac_info: Option<String>,
        commercial_cafe: Option<String>,
        door_access_codes: Option<String>,
        lease_obligations: Option<String>,
        signage_rights: Option<String>,
        parking_spaces: Option<String>,
        electrical_amperage: Option<String>,
        misc: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updates::parse_payload;
    use pis_core::entities::NewSuite;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_sets_only_named_fields() {
        let update = SuiteUpdateBuilder::new()
            .suite(Some("102".into()))
            .notes(None)
            .build();
        assert_eq!(update.suite, Some(Some("102".into())));
        assert_eq!(update.notes, Some(None));
        assert_eq!(update.hvac, None);
        assert!(!update.is_empty());
        assert!(SuiteUpdate::default().is_empty());
    }

    #[test]
    fn apply_reports_only_real_changes() {
        let mut suite = NewSuite {
            suite: Some("101".into()),
            hvac: Some("rooftop".into()),
            ..NewSuite::for_property("P1")
        }
        .into_suite(1);

        let update: SuiteUpdate =
            parse_payload(r#"{"suite":"102","hvac":"rooftop","misc":null}"#).unwrap();
        let changes = update.apply(&mut suite);

        let fields: Vec<_> = changes.iter().map(|c| c.field).collect();
        assert_eq!(fields, ["suite"]);
        assert_eq!(changes[0].old_value, "101");
        assert_eq!(changes[0].new_value, "102");
        assert_eq!(suite.suite.as_deref(), Some("102"));
    }

    #[test]
    fn unknown_key_is_named() {
        let err = parse_payload::<SuiteUpdate>(r#"{"floor":"2"}"#).unwrap_err();
        assert!(err.to_string().contains("floor"), "{err}");
    }

    #[test]
    fn id_is_not_part_of_the_whitelist() {
        assert!(!SuiteUpdate::FIELDS.contains(&"suite_id"));
        assert!(SuiteUpdate::FIELDS.contains(&"electrical_amperage"));
    }
}
