//! Update payloads for entity mutations.
//!
//! Each update struct is a fixed whitelist of the entity's mutable columns.
//! JSON input with any other key is rejected. A field is written only when
//! it is present in the payload *and* differs from the stored value; the
//! resulting [`FieldChange`] list drives both the UPDATE statement and one
//! audit row per change.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};

use crate::error::DatabaseError;

/// A column value that can be bound in SQL and rendered for the audit log.
pub trait ColumnValue: Clone + PartialEq {
    fn to_sql(&self) -> libsql::Value;

    /// Text stored in `old_value`/`new_value`. No value renders as `""`.
    fn audit_text(&self) -> String;
}

impl ColumnValue for String {
    fn to_sql(&self) -> libsql::Value {
        libsql::Value::Text(self.clone())
    }

    fn audit_text(&self) -> String {
        self.clone()
    }
}

impl ColumnValue for i64 {
    fn to_sql(&self) -> libsql::Value {
        libsql::Value::Integer(*self)
    }

    fn audit_text(&self) -> String {
        self.to_string()
    }
}

impl ColumnValue for bool {
    fn to_sql(&self) -> libsql::Value {
        libsql::Value::Integer(i64::from(*self))
    }

    fn audit_text(&self) -> String {
        self.to_string()
    }
}

impl<T: ColumnValue> ColumnValue for Option<T> {
    fn to_sql(&self) -> libsql::Value {
        self.as_ref().map_or(libsql::Value::Null, ColumnValue::to_sql)
    }

    fn audit_text(&self) -> String {
        self.as_ref().map(ColumnValue::audit_text).unwrap_or_default()
    }
}

/// One column whose value actually changed.
#[derive(Debug, Clone)]
pub struct FieldChange {
    pub field: &'static str,
    pub old_value: String,
    pub new_value: String,
    pub(crate) value: libsql::Value,
}

/// Overwrite `current` with `new` and record the change, unless they are equal.
pub(crate) fn apply_field<T: ColumnValue>(
    changes: &mut Vec<FieldChange>,
    field: &'static str,
    current: &mut T,
    new: &T,
) {
    if current == new {
        return;
    }
    changes.push(FieldChange {
        field,
        old_value: current.audit_text(),
        new_value: new.audit_text(),
        value: new.to_sql(),
    });
    current.clone_from(new);
}

/// Build `UPDATE {table} SET a = ?1, b = ?2 WHERE {key_column} = ?3`.
pub(crate) fn update_statement(
    table: &str,
    key_column: &str,
    key: libsql::Value,
    changes: &[FieldChange],
) -> (String, Vec<libsql::Value>) {
    let mut sets = Vec::with_capacity(changes.len());
    let mut params = Vec::with_capacity(changes.len() + 1);
    for change in changes {
        params.push(change.value.clone());
        sets.push(format!("{} = ?{}", change.field, params.len()));
    }
    params.push(key);
    let sql = format!(
        "UPDATE {table} SET {} WHERE {key_column} = ?{}",
        sets.join(", "),
        params.len()
    );
    (sql, params)
}

/// Deserialize a present field as `Some`, so an explicit `null` on a nullable
/// column becomes `Some(None)` while an absent key stays `None`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Parse a JSON create or update payload, naming the offending key on failure.
///
/// # Errors
///
/// Returns `DatabaseError::Validation` for malformed JSON, unknown keys or
/// mistyped values.
pub fn parse_payload<T: DeserializeOwned>(raw: &str) -> Result<T, DatabaseError> {
    serde_json::from_str(raw).map_err(|e| DatabaseError::Validation(e.to_string()))
}

/// Declare an update whitelist and its builder for one entity.
///
/// Every listed field becomes `Option<$ty>` on the update struct; use
/// `Option<String>` as `$ty` for nullable columns.
macro_rules! entity_update {
    (
        $(#[$meta:meta])*
        $update:ident, $builder:ident for $entity:ty {
            $( $field:ident : $ty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct $update {
            $(
                #[serde(
                    default,
                    deserialize_with = "crate::updates::present",
                    skip_serializing_if = "Option::is_none"
                )]
                pub $field: Option<$ty>,
            )+
        }

        impl $update {
            /// Column names accepted by this update.
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field)),+];

            #[must_use]
            pub const fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())+
            }

            /// Apply present fields to `entity`, returning only those that changed.
            pub(crate) fn apply(&self, entity: &mut $entity) -> Vec<crate::updates::FieldChange> {
                let mut changes = Vec::new();
                $(
                    if let Some(ref value) = self.$field {
                        crate::updates::apply_field(
                            &mut changes,
                            stringify!($field),
                            &mut entity.$field,
                            value,
                        );
                    }
                )+
                changes
            }
        }

        pub struct $builder($update);

        impl $builder {
            #[must_use]
            pub fn new() -> Self {
                Self($update::default())
            }

            $(
                #[must_use]
                pub fn $field(mut self, val: $ty) -> Self {
                    self.0.$field = Some(val);
                    self
                }
            )+

            #[must_use]
            pub fn build(self) -> $update {
                self.0
            }
        }

        impl Default for $builder {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

// Declared after the macro so it is in textual scope for each module.
pub mod code;
pub mod contact;
pub mod permit;
pub mod property;
pub mod service;
pub mod suite;
pub mod utility;
