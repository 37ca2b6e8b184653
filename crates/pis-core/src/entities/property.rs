use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const fn default_active() -> bool {
    true
}

/// Root aggregate. Keyed by its Yardi code, which never changes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Property {
    pub yardi: String,
    pub address: Option<String>,
    pub prop_photo: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<i64>,
    pub building_type: Option<String>,
    pub total_sq_ft: Option<i64>,
    pub prop_manager: Option<String>,
    pub coe: Option<String>,
    pub year_built: Option<String>,
    pub year_rent: Option<String>,
    pub num_buildings: Option<String>,
    pub num_stories: Option<String>,
    pub apn: Option<String>,
    pub prop_tax_id: Option<String>,
    pub parking: Option<String>,
    pub fire_sprinklers: Option<String>,
    pub net_rentable_area: Option<String>,
    pub land_area: Option<String>,
    pub structural_frame: Option<String>,
    pub foundation: Option<String>,
    pub roof_type: Option<String>,
    pub roof_cover: Option<String>,
    pub heat_cooling_source: Option<String>,
    pub misc: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Fields accepted when creating a property. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NewProperty {
    pub yardi: String,
    pub address: Option<String>,
    pub prop_photo: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<i64>,
    pub building_type: Option<String>,
    pub total_sq_ft: Option<i64>,
    pub prop_manager: Option<String>,
    pub coe: Option<String>,
    pub year_built: Option<String>,
    pub year_rent: Option<String>,
    pub num_buildings: Option<String>,
    pub num_stories: Option<String>,
    pub apn: Option<String>,
    pub prop_tax_id: Option<String>,
    pub parking: Option<String>,
    pub fire_sprinklers: Option<String>,
    pub net_rentable_area: Option<String>,
    pub land_area: Option<String>,
    pub structural_frame: Option<String>,
    pub foundation: Option<String>,
    pub roof_type: Option<String>,
    pub roof_cover: Option<String>,
    pub heat_cooling_source: Option<String>,
    pub misc: Option<String>,
    pub active: Option<bool>,
}

impl NewProperty {
    /// Create a payload with only the key set.
    #[must_use]
    pub fn with_yardi(yardi: impl Into<String>) -> Self {
        Self {
            yardi: yardi.into(),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the Yardi code is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.yardi.trim().is_empty() {
            return Err(CoreError::Validation("property yardi must not be empty".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn into_property(self) -> Property {
        Property {
            yardi: self.yardi,
            address: self.address,
            prop_photo: self.prop_photo,
            city: self.city,
            state: self.state,
            zip: self.zip,
            building_type: self.building_type,
            total_sq_ft: self.total_sq_ft,
            prop_manager: self.prop_manager,
            coe: self.coe,
            year_built: self.year_built,
            year_rent: self.year_rent,
            num_buildings: self.num_buildings,
            num_stories: self.num_stories,
            apn: self.apn,
            prop_tax_id: self.prop_tax_id,
            parking: self.parking,
            fire_sprinklers: self.fire_sprinklers,
            net_rentable_area: self.net_rentable_area,
            land_area: self.land_area,
            structural_frame: self.structural_frame,
            foundation: self.foundation,
            roof_type: self.roof_type,
            roof_cover: self.roof_cover,
            heat_cooling_source: self.heat_cooling_source,
            misc: self.misc,
            active: self.active.unwrap_or_else(default_active),
        }
    }
}
