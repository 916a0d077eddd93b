//! Core types for Mediscreen.
//!
//! This module provides type-safe wrappers for record identifiers.

pub mod id;

pub use id::*;
