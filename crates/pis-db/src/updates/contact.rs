//! Contact update whitelist. Links are managed through the link registry,
//! not through updates.

use pis_core::entities::Contact;

entity_update! {
    ContactUpdate, ContactUpdateBuilder for Contact {
        name: Option<String>,
        title: Option<String>,
        office_number: Option<String>,
        cell_number: Option<String>,
        email: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updates::parse_payload;

    #[test]
    fn link_keys_are_rejected() {
        let err = parse_payload::<ContactUpdate>(r#"{"suite_id":1}"#).unwrap_err();
        assert!(err.to_string().contains("suite_id"), "{err}");
    }
}
