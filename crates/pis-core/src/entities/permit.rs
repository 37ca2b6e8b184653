use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A municipal permit on file for a property.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Permit {
    pub permit_id: i64,
    pub property_yardi: String,
    pub municipality: Option<String>,
    pub permit_type: Option<String>,
    pub permit_number: Option<String>,
    pub status: Option<String>,
    pub issued_date: Option<String>,
    pub expiration_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NewPermit {
    pub permit_id: Option<i64>,
    pub property_yardi: String,
    pub municipality: Option<String>,
    pub permit_type: Option<String>,
    pub permit_number: Option<String>,
    pub status: Option<String>,
    pub issued_date: Option<String>,
    pub expiration_date: Option<String>,
    pub notes: Option<String>,
}

impl NewPermit {
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
        super::require_positive_id(self.permit_id, "permit_id")?;
        super::require_property(&self.property_yardi, "permit")
    }

    #[must_use]
    pub fn into_permit(self, permit_id: i64) -> Permit {
        Permit {
            permit_id,
            property_yardi: self.property_yardi,
            municipality: self.municipality,
            permit_type: self.permit_type,
            permit_number: self.permit_number,
            status: self.status,
            issued_date: self.issued_date,
            expiration_date: self.expiration_date,
            notes: self.notes,
        }
    }
}
