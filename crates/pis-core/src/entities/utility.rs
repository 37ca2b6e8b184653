use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A utility account (power, water, gas, ...) attached to a property.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Utility {
    pub utility_id: i64,
    pub property_yardi: String,
    pub service: Option<String>,
    pub vendor: Option<String>,
    pub contact_info: Option<String>,
    pub account_number: Option<String>,
    pub meter_number: Option<String>,
    pub notes: Option<String>,
    pub paid_by: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NewUtility {
    pub utility_id: Option<i64>,
    pub property_yardi: String,
    pub service: Option<String>,
    pub vendor: Option<String>,
    pub contact_info: Option<String>,
    pub account_number: Option<String>,
    pub meter_number: Option<String>,
    pub notes: Option<String>,
    pub paid_by: Option<String>,
}

impl NewUtility {
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
        super::require_positive_id(self.utility_id, "utility_id")?;
        super::require_property(&self.property_yardi, "utility")
    }

    #[must_use]
    pub fn into_utility(self, utility_id: i64) -> Utility {
        Utility {
            utility_id,
            property_yardi: self.property_yardi,
            service: self.service,
            vendor: self.vendor,
            contact_info: self.contact_info,
            account_number: self.account_number,
            meter_number: self.meter_number,
            notes: self.notes,
            paid_by: self.paid_by,
        }
    }
}
