use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A vendor service contracted for a property (landscaping, janitorial, ...).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Service {
    pub service_id: i64,
    pub property_yardi: String,
    pub service_type: Option<String>,
    pub vendor: Option<String>,
    pub contact: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub notes: Option<String>,
    pub paid_by: Option<String>,
    pub tenant_specifics: Option<String>,
    pub suite_specifics: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NewService {
    pub service_id: Option<i64>,
    pub property_yardi: String,
    pub service_type: Option<String>,
    pub vendor: Option<String>,
    pub contact: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub notes: Option<String>,
    pub paid_by: Option<String>,
    pub tenant_specifics: Option<String>,
    pub suite_specifics: Option<String>,
}

impl NewService {
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
        super::require_positive_id(self.service_id, "service_id")?;
        super::require_property(&self.property_yardi, "service")
    }

    #[must_use]
    pub fn into_service(self, service_id: i64) -> Service {
        Service {
            service_id,
            property_yardi: self.property_yardi,
            service_type: self.service_type,
            vendor: self.vendor,
            contact: self.contact,
            phone_number: self.phone_number,
            email_address: self.email_address,
            notes: self.notes,
            paid_by: self.paid_by,
            tenant_specifics: self.tenant_specifics,
            suite_specifics: self.suite_specifics,
        }
    }
}
