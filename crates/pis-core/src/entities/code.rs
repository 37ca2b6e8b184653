use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// An access or alarm code for a property.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Code {
    pub code_id: i64,
    pub property_yardi: String,
    pub description: Option<String>,
    pub code: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NewCode {
    pub code_id: Option<i64>,
    pub property_yardi: String,
    pub description: Option<String>,
    pub code: Option<String>,
    pub notes: Option<String>,
}

impl NewCode {
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
        super::require_positive_id(self.code_id, "code_id")?;
        super::require_property(&self.property_yardi, "code")
    }

    #[must_use]
    pub fn into_code(self, code_id: i64) -> Code {
        Code {
            code_id,
            property_yardi: self.property_yardi,
            description: self.description,
            code: self.code,
            notes: self.notes,
        }
    }
}
