//! LeadScout Core - Shared data-model types.
//!
//! This crate provides the types exchanged with the LeadScout backend and
//! shared by the other workspace members:
//! - `client` - Session store, API client and page controllers
//! - `cli` - Terminal front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. Records owned by the backend are modelled as
//! pass-through structs; the client displays and sorts them but never
//! computes over them.
//!
//! # Modules
//!
//! - [`types`] - IDs, users, companies, credits, dashboard and search records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
