//! Human-readable descriptions of audited entities.
//!
//! These are pure functions over [`EntityRef`]. Label extraction is fallible
//! ([`try_resolve_label`]) and the failure is absorbed once, in
//! [`resolve_label`], so an audit row always gets written with at least the
//! bare id.

use thiserror::Error;
use tracing::debug;

use crate::entities::{Code, Contact, Permit, Property, Service, Suite, Utility};
use crate::enums::EntityType;

/// Borrowed view over any audited entity.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Property(&'a Property),
    Suite(&'a Suite),
    Service(&'a Service),
    Utility(&'a Utility),
    Code(&'a Code),
    Contact(&'a Contact),
    Permit(&'a Permit),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("no entity instance to label")]
    Absent,

    #[error("no non-empty label field on {0}")]
    Empty(EntityType),
}

impl EntityRef<'_> {
    #[must_use]
    pub const fn entity_type(&self) -> EntityType {
        match self {
            Self::Property(_) => EntityType::Property,
            Self::Suite(_) => EntityType::Suite,
            Self::Service(_) => EntityType::Service,
            Self::Utility(_) => EntityType::Utility,
            Self::Code(_) => EntityType::Code,
            Self::Contact(_) => EntityType::Contact,
            Self::Permit(_) => EntityType::Permit,
        }
    }

    /// Raw primary key rendered as text.
    #[must_use]
    pub fn entity_id(&self) -> String {
        match self {
            Self::Property(p) => p.yardi.clone(),
            Self::Suite(s) => s.suite_id.to_string(),
            Self::Service(s) => s.service_id.to_string(),
            Self::Utility(u) => u.utility_id.to_string(),
            Self::Code(c) => c.code_id.to_string(),
            Self::Contact(c) => c.contact_id.to_string(),
            Self::Permit(p) => p.permit_id.to_string(),
        }
    }

    /// The owning property, for entities that carry that foreign key.
    #[must_use]
    pub fn property_yardi(&self) -> Option<&str> {
        match self {
            Self::Property(_) | Self::Contact(_) => None,
            Self::Suite(s) => Some(&s.property_yardi),
            Self::Service(s) => Some(&s.property_yardi),
            Self::Utility(u) => Some(&u.property_yardi),
            Self::Code(c) => Some(&c.property_yardi),
            Self::Permit(p) => Some(&p.property_yardi),
        }
    }

    /// Candidate label fields in priority order.
    fn label_candidates(&self) -> Vec<Option<&str>> {
        match self {
            Self::Property(p) => vec![p.address.as_deref(), Some(p.yardi.as_str())],
            Self::Suite(s) => vec![s.suite.as_deref()],
            Self::Service(s) => vec![s.service_type.as_deref(), s.vendor.as_deref()],
            Self::Utility(u) => vec![u.service.as_deref(), u.account_number.as_deref()],
            Self::Code(c) => vec![c.description.as_deref(), c.code.as_deref()],
            Self::Contact(c) => vec![c.name.as_deref()],
            Self::Permit(p) => vec![p.permit_number.as_deref(), p.municipality.as_deref()],
        }
    }
}

macro_rules! impl_from_entity {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for EntityRef<'a> {
                fn from(value: &'a $ty) -> Self {
                    Self::$ty(value)
                }
            }
        )+
    };
}

impl_from_entity!(Property, Suite, Service, Utility, Code, Contact, Permit);

/// First non-blank label field of `entity`.
///
/// # Errors
///
/// `LabelError::Absent` when there is no instance, `LabelError::Empty` when
/// every candidate field is missing or whitespace.
pub fn try_resolve_label(entity: Option<EntityRef<'_>>) -> Result<String, LabelError> {
    let entity = entity.ok_or(LabelError::Absent)?;
    entity
        .label_candidates()
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .map(str::to_owned)
        .ok_or_else(|| LabelError::Empty(entity.entity_type()))
}

/// Best-effort label. Never fails; an unresolvable label is `None`.
#[must_use]
pub fn resolve_label(entity: Option<EntityRef<'_>>) -> Option<String> {
    match try_resolve_label(entity) {
        Ok(label) => Some(label),
        Err(error) => {
            debug!(%error, "audit label unavailable, using bare id");
            None
        }
    }
}

#[must_use]
pub fn format_entity_display(entity_id: &str, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{entity_id} / {label}"),
        None => entity_id.to_owned(),
    }
}

/// Append `(property {yardi})` when the entity has an owning property.
#[must_use]
pub fn contextualize_field(entity: Option<EntityRef<'_>>, field_name: &str) -> String {
    match entity.as_ref().and_then(EntityRef::property_yardi) {
        Some(yardi) => format!("{field_name} (property {yardi})"),
        None => field_name.to_owned(),
    }
}
