//! Utility update whitelist.

use pis_core::entities::Utility;

entity_update! {
    UtilityUpdate, UtilityUpdateBuilder for Utility {
        property_yardi: String,
        service: Option<String>,
        vendor: Option<String>,
        contact_info: Option<String>,
        account_number: Option<String>,
        meter_number: Option<String>,
        notes: Option<String>,
        paid_by: Option<String>,
    }
}
