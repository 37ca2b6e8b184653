//! Service update whitelist.

use pis_core::entities::Service;

entity_update! {
    ServiceUpdate, ServiceUpdateBuilder for Service {
        property_yardi: String,
        service_type: Option<String>,
        vendor: Option<String>,
        contact: Option<String>,
        phone_number: Option<String>,
        email_address: Option<String>,
        notes: Option<String>,
        paid_by: Option<String>,
        tenant_specifics: Option<String>,
        suite_specifics: Option<String>,
    }
}
