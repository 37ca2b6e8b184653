//! # pis-core
//!
//! Core types shared across the property information system crates.
//!
//! - Entity structs for properties and their sub-records (suites, services,
//!   utilities, codes, permits, photos) plus standalone contacts
//! - Closed enums for audited entity types, audit actions and link owners
//! - The change describer: entity labels and property context for audit rows
//! - Cross-cutting error types

pub mod describe;
pub mod entities;
pub mod enums;
pub mod errors;
