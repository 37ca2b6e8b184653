use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::OwnerType;
use crate::errors::CoreError;

/// A person reachable about one or more suites, services or utilities.
///
/// Contacts have no property foreign key; they are attached to owners
/// through the link relations only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Contact {
    pub contact_id: i64,
    pub name: Option<String>,
    pub title: Option<String>,
    pub office_number: Option<String>,
    pub cell_number: Option<String>,
    pub email: Option<String>,
}

/// Create payload. Each supplied owner id produces one link row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NewContact {
    pub contact_id: Option<i64>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub office_number: Option<String>,
    pub cell_number: Option<String>,
    pub email: Option<String>,
    pub suite_id: Option<i64>,
    pub service_id: Option<i64>,
    pub utility_id: Option<i64>,
}

impl NewContact {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Owners this contact should be linked to on creation. Non-positive ids
    /// name no owner and are skipped.
    #[must_use]
    pub fn owners(&self) -> Vec<(OwnerType, i64)> {
        [
            (OwnerType::Suite, self.suite_id),
            (OwnerType::Service, self.service_id),
            (OwnerType::Utility, self.utility_id),
        ]
        .into_iter()
        .filter_map(|(owner, id)| id.filter(|id| *id > 0).map(|id| (owner, id)))
        .collect()
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if an explicit id or owner id is not
    /// positive.
    pub fn validate(&self) -> Result<(), CoreError> {
        super::require_positive_id(self.contact_id, "contact_id")?;
        super::require_positive_id(self.suite_id, "suite_id")?;
        super::require_positive_id(self.service_id, "service_id")?;
        super::require_positive_id(self.utility_id, "utility_id")
    }

    #[must_use]
    pub fn into_contact(self, contact_id: i64) -> Contact {
        Contact {
            contact_id,
            name: self.name,
            title: self.title,
            office_number: self.office_number,
            cell_number: self.cell_number,
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owners_lists_only_supplied_ids() {
        let new = NewContact {
            suite_id: Some(1),
            utility_id: Some(9),
            ..NewContact::named("Jane")
        };
        assert_eq!(new.owners(), vec![(OwnerType::Suite, 1), (OwnerType::Utility, 9)]);
    }

    #[test]
    fn link_keys_are_not_contact_fields() {
        let new = NewContact {
            suite_id: Some(1),
            ..NewContact::named("Jane")
        };
        let contact = new.into_contact(5);
        let json = serde_json::to_value(&contact).unwrap();
        assert!(json.get("suite_id").is_none());
        assert_eq!(json["name"], "Jane");
    }

    #[test]
    fn zero_owner_id_is_not_an_owner() {
        let new = NewContact {
            suite_id: Some(0),
            service_id: Some(-3),
            utility_id: Some(2),
            ..NewContact::named("Jane")
        };
        assert_eq!(new.owners(), vec![(OwnerType::Utility, 2)]);
    }

    #[test]
    fn zero_owner_id_fails_validation() {
        let new = NewContact {
            suite_id: Some(0),
            ..NewContact::named("Jane")
        };
        let err = new.validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref msg) if msg.contains("suite_id")), "{err}");
    }
}
