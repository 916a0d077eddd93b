//! Mediscreen Core - Shared record types library.
//!
//! This crate provides the types used by the Mediscreen SQL service and its
//! tests:
//! - typed identifiers for each record kind
//! - the `Patient` and `User` records
//! - the per-field validation rules both records are checked against
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP. Enable the `postgres` feature to bind identifiers directly in
//! `sqlx` queries.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs
//! - [`models`] - Record kinds
//! - [`record`] - The [`Record`] trait shared by every kind
//! - [`validation`] - Presence and length rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod record;
pub mod types;
pub mod validation;

pub use models::{Patient, User};
pub use record::Record;
pub use types::*;
pub use validation::{FieldRule, Violation};
