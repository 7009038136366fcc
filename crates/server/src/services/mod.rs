//! Business logic services for the pickup-point API.
//!
//! # Services
//!
//! - `credentials` - Bearer credential issue/verify (`CredentialAuthority`)
//! - `registry` - Pickup-point registration and listing
//! - `receptions` - Reception open/close lifecycle
//! - `ledger` - Product add / delete-last within the active reception
//!
//! Every entry point takes the caller's resolved [`pvz_core::Role`] and checks
//! it against the operation's permission table before touching the store.

pub mod credentials;
mod error;
pub mod ledger;
pub mod receptions;
pub mod registry;

pub use credentials::{CredentialAuthority, StaticRoleAuthority};
pub use error::ServiceError;
pub use ledger::ProductLedger;
pub use receptions::ReceptionManager;
pub use registry::PvzRegistry;
