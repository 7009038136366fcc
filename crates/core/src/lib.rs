//! PVZ Core - Shared domain types for the pickup-point service.
//!
//! This crate provides the types used across all service components:
//! - `server` - HTTP API over the pickup-point ledger
//! - `cli` - Command-line tools for migrations and development tokens
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no database
//! access, no HTTP. This keeps the permission table and validation rules
//! testable in isolation.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, statuses, product types, city whitelist, paging
//! - [`capability`] - Role resolution and the operation permission table

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod capability;
pub mod types;

pub use capability::{CapabilityError, Operation};
pub use types::*;
