//! Mediscreen SQL service library.
//!
//! This crate provides the service as a library, allowing the router to be
//! driven in tests over in-memory stores and reused by the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
