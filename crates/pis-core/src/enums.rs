//! Entity types, audit actions, and link owner types.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the exact text stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of an audited entity, stored in `edit_history.entity_type`.
///
/// Property photos are deliberately absent: they are stored but not audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Property,
    Suite,
    Service,
    Utility,
    Code,
    Contact,
    Permit,
}

impl EntityType {
    pub const ALL: [Self; 7] = [
        Self::Property,
        Self::Suite,
        Self::Service,
        Self::Utility,
        Self::Code,
        Self::Contact,
        Self::Permit,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Suite => "suite",
            Self::Service => "service",
            Self::Utility => "utility",
            Self::Code => "code",
            Self::Contact => "contact",
            Self::Permit => "permit",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Kind of change recorded in an audit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Add,
    Edit,
    Delete,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OwnerType
// ---------------------------------------------------------------------------

/// An entity type that can have contacts linked to it.
///
/// Each owner type has its own join table; the owner-side foreign key
/// cascades on delete, the contact side does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OwnerType {
    Suite,
    Service,
    Utility,
}

impl OwnerType {
    pub const ALL: [Self; 3] = [Self::Suite, Self::Service, Self::Utility];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Suite => "suite",
            Self::Service => "service",
            Self::Utility => "utility",
        }
    }

    /// Join table holding this owner's contact links.
    #[must_use]
    pub const fn link_table(self) -> &'static str {
        match self {
            Self::Suite => "suite_contacts",
            Self::Service => "service_contacts",
            Self::Utility => "utility_contacts",
        }
    }

    /// Table holding the owner rows themselves.
    #[must_use]
    pub const fn owner_table(self) -> &'static str {
        match self {
            Self::Suite => "suites",
            Self::Service => "services",
            Self::Utility => "utilities",
        }
    }

    /// Primary key column of the owner, also used as the join table column.
    #[must_use]
    pub const fn owner_column(self) -> &'static str {
        match self {
            Self::Suite => "suite_id",
            Self::Service => "service_id",
            Self::Utility => "utility_id",
        }
    }

    /// The audited entity type corresponding to this owner.
    #[must_use]
    pub const fn entity_type(self) -> EntityType {
        match self {
            Self::Suite => EntityType::Suite,
            Self::Service => EntityType::Service,
            Self::Utility => EntityType::Utility,
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let val: $ty = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected));
                let back: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(back, val);
                assert_eq!(val.as_str(), $expected);
            }
        };
    }

    test_serde_roundtrip!(entity_type_property, EntityType, EntityType::Property, "property");
    test_serde_roundtrip!(entity_type_permit, EntityType, EntityType::Permit, "permit");
    test_serde_roundtrip!(audit_action_add, AuditAction, AuditAction::Add, "add");
    test_serde_roundtrip!(audit_action_delete, AuditAction, AuditAction::Delete, "delete");
    test_serde_roundtrip!(owner_type_utility, OwnerType, OwnerType::Utility, "utility");

    #[test]
    fn photo_is_not_an_audited_entity_type() {
        let result: Result<EntityType, _> = serde_json::from_str("\"photo\"");
        assert!(result.is_err());
    }

    #[test]
    fn owner_tables_are_distinct() {
        let tables: Vec<_> = OwnerType::ALL.iter().map(|o| o.link_table()).collect();
        assert_eq!(tables, ["suite_contacts", "service_contacts", "utility_contacts"]);
        for owner in OwnerType::ALL {
            assert_eq!(owner.entity_type().as_str(), owner.as_str());
        }
    }
}
