//! Permit update whitelist.

use pis_core::entities::Permit;

entity_update! {
    PermitUpdate, PermitUpdateBuilder for Permit {
        property_yardi: String,
        municipality: Option<String>,
        permit_type: Option<String>,
        permit_number: Option<String>,
        status: Option<String>,
        issued_date: Option<String>,
        expiration_date: Option<String>,
        notes: Option<String>,
    }
}
