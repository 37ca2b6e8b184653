//! Code update whitelist.

use pis_core::entities::Code;

entity_update! {
    CodeUpdate, CodeUpdateBuilder for Code {
        property_yardi: String,
        description: Option<String>,
        code: Option<String>,
        notes: Option<String>,
    }
}
