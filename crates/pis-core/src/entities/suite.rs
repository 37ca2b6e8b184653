use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A leasable unit inside a property.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Suite {
    pub suite_id: i64,
    pub property_yardi: String,
    pub suite: Option<String>,
    pub sqft: Option<String>,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub notes: Option<String>,
    pub hvac: Option<String>,
    pub hvac_info: Option<String>,
    pub commercial_cafe: Option<String>,
    pub door_access_codes: Option<String>,
    pub lease_obligations: Option<String>,
    pub signage_rights: Option<String>,
    pub parking_spaces: Option<String>,
    pub electrical_amperage: Option<String>,
    pub misc: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NewSuite {
    /// Explicit id; assigned by the store when absent.
    pub suite_id: Option<i64>,
    pub property_yardi: String,
    pub suite: Option<String>,
    pub sqft: Option<String>,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub notes: Option<String>,
    pub hvac: Option<String>,
    pub hvac_info: Option<String>,
    pub commercial_cafe: Option<String>,
    pub door_access_codes: Option<String>,
    pub lease_obligations: Option<String>,
    pub signage_rights: Option<String>,
    pub parking_spaces: Option<String>,
    pub electrical_amperage: Option<String>,
    pub misc: Option<String>,
}

impl NewSuite {
    #[must_use]
    pub fn for_property(property_yardi: impl Into<String>) -> Self {
        Self {
            property_yardi: property_yardi.into(),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the owning property is blank or an
    /// explicit id is not positive.
    pub fn validate(&self) -> Result<(), CoreError> {
        super::require_positive_id(self.suite_id, "suite_id")?;
        super::require_property(&self.property_yardi, "suite")
    }

    #[must_use]
    pub fn into_suite(self, suite_id: i64) -> Suite {
        Suite {
            suite_id,
            property_yardi: self.property_yardi,
            suite: self.suite,
            sqft: self.sqft,
            name: self.name,
            contact: self.contact,
            phone_number: self.phone_number,
            email_address: self.email_address,
            notes: self.notes,
            hvac: self.hvac,
            hvac_info: self.hvac_info,
            commercial_cafe: self.commercial_cafe,
            door_access_codes: self.door_access_codes,
            lease_obligations: self.lease_obligations,
            signage_rights: self.signage_rights,
            parking_spaces: self.parking_spaces,
            electrical_amperage: self.electrical_amperage,
            misc: self.misc,
        }
    }
}
