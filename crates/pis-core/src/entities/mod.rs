//! Entity structs and their create payloads.
//!
//! Each child entity is owned by exactly one property through
//! `property_yardi`. Update payloads live in `pis-db` next to the code that
//! applies them.

mod code;
mod contact;
mod history;
mod link;
mod permit;
mod photo;
mod property;
mod service;
mod suite;
mod utility;

pub use code::{Code, NewCode};
pub use contact::{Contact, NewContact};
pub use history::{CREATED_MARKER, DELETED_MARKER, EditHistory};
pub use link::ContactLink;
pub use permit::{NewPermit, Permit};
pub use photo::{NewPropertyPhoto, PropertyPhoto};
pub use property::{NewProperty, Property};
pub use service::{NewService, Service};
pub use suite::{NewSuite, Suite};
pub use utility::{NewUtility, Utility};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

fn require_property(property_yardi: &str, what: &str) -> Result<(), CoreError> {
    if property_yardi.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{what} requires a non-empty property_yardi"
        )));
    }
    Ok(())
}

fn require_positive_id(id: Option<i64>, field: &str) -> Result<(), CoreError> {
    if id.is_some_and(|id| id <= 0) {
        return Err(CoreError::Validation(format!("{field} must be positive")));
    }
    Ok(())
}

/// An owner entity together with the contacts linked to it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WithContacts<T> {
    #[serde(flatten)]
    pub item: T,
    pub contacts: Vec<Contact>,
}

/// A property with every child record nested under it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub property: Property,
    pub suites: Vec<WithContacts<Suite>>,
    pub services: Vec<WithContacts<Service>>,
    pub utilities: Vec<WithContacts<Utility>>,
    pub codes: Vec<Code>,
    pub permits: Vec<Permit>,
    pub photos: Vec<PropertyPhoto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn new_property_rejects_unknown_keys() {
        let err = serde_json::from_str::<NewProperty>(r#"{"yardi":"P1","colour":"red"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("colour"), "{err}");
    }

    #[test]
    fn new_property_defaults_active() {
        let new: NewProperty = serde_json::from_str(r#"{"yardi":"P1"}"#).unwrap();
        let property = new.into_property();
        assert!(property.active);
        assert_eq!(property.address, None);
    }

    #[test]
    fn blank_property_yardi_is_a_validation_error() {
        let err = NewSuite::for_property("  ").validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(NewProperty::with_yardi("").validate().is_err());
    }

    #[test]
    fn photo_caption_defaults_to_empty() {
        let new: NewPropertyPhoto =
            serde_json::from_str(r#"{"property_yardi":"P1","photo_url":"https://x/1.jpg"}"#)
                .unwrap();
        new.validate().unwrap();
        assert_eq!(new.into_photo(1).caption, "");
    }

    #[test]
    fn with_contacts_flattens_the_owner() {
        let suite = NewSuite {
            suite: Some("101".into()),
            ..NewSuite::for_property("P1")
        }
        .into_suite(1);
        let wrapped = WithContacts {
            item: suite,
            contacts: vec![NewContact::named("Jane").into_contact(5)],
        };
        let json = serde_json::to_value(&wrapped).unwrap();
        assert_eq!(json["suite_id"], 1);
        assert_eq!(json["suite"], "101");
        assert_eq!(json["contacts"][0]["name"], "Jane");
    }

    #[rstest]
    #[case::suite(NewSuite { suite_id: Some(0), ..NewSuite::for_property("P1") }.validate(), "suite_id")]
    #[case::service(NewService { service_id: Some(-1), ..NewService::for_property("P1") }.validate(), "service_id")]
    #[case::utility(NewUtility { utility_id: Some(0), ..NewUtility::for_property("P1") }.validate(), "utility_id")]
    #[case::code(NewCode { code_id: Some(-7), ..NewCode::for_property("P1") }.validate(), "code_id")]
    #[case::permit(NewPermit { permit_id: Some(0), ..NewPermit::for_property("P1") }.validate(), "permit_id")]
    #[case::photo(
        NewPropertyPhoto {
            photo_id: Some(0),
            property_yardi: "P1".into(),
            photo_url: "https://x/1.jpg".into(),
            caption: String::new(),
        }
        .validate(),
        "photo_id"
    )]
    #[case::contact(NewContact { contact_id: Some(0), ..NewContact::named("Jane") }.validate(), "contact_id")]
    fn non_positive_explicit_id_is_rejected(
        #[case] result: Result<(), CoreError>,
        #[case] field: &str,
    ) {
        match result {
            Err(CoreError::Validation(msg)) => assert!(msg.contains(field), "{msg}"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn positive_explicit_id_is_accepted() {
        let new = NewSuite {
            suite_id: Some(7),
            ..NewSuite::for_property("P1")
        };
        new.validate().unwrap();
    }
}
