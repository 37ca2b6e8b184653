use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A photo reference attached to a property. Photos are stored but not audited.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PropertyPhoto {
    pub photo_id: i64,
    pub property_yardi: String,
    pub photo_url: String,
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NewPropertyPhoto {
    pub photo_id: Option<i64>,
    pub property_yardi: String,
    pub photo_url: String,
    #[serde(default)]
    pub caption: String,
}

impl NewPropertyPhoto {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the property or the URL is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        super::require_positive_id(self.photo_id, "photo_id")?;
        super::require_property(&self.property_yardi, "photo")?;
        if self.photo_url.trim().is_empty() {
            return Err(CoreError::Validation("photo_url must not be empty".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn into_photo(self, photo_id: i64) -> PropertyPhoto {
        PropertyPhoto {
            photo_id,
            property_yardi: self.property_yardi,
            photo_url: self.photo_url,
            caption: self.caption,
        }
    }
}
