use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::OwnerType;

/// One junction row between an owner entity and a contact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ContactLink {
    pub link_id: i64,
    pub owner_type: OwnerType,
    pub owner_id: i64,
    pub contact_id: i64,
}
