//! Service error types.

use thiserror::Error;

use pvz_core::{CapabilityError, ListingError};

use crate::db::RepositoryError;

/// Errors that can occur in pickup-point operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller's role may not perform the operation.
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// Listing parameters failed validation.
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// City is outside the configured whitelist.
    #[error("city not allowed")]
    CityNotAllowed(String),

    /// A pickup point with this id is already registered.
    #[error("pvz already exists")]
    PickupPointExists,

    /// No pickup point with this id.
    #[error("pvz not found")]
    PickupPointNotFound,

    /// The point already has a reception in progress.
    #[error("already an open reception")]
    AlreadyOpen,

    /// The point has no reception in progress.
    #[error("no active reception")]
    NoActiveReception,

    /// No reception in progress, or it holds no products.
    #[error("no products to delete or no active receptions")]
    NothingToDelete,

    /// Repository/database error.
    #[error("database error: {0}")]
    Store(#[from] RepositoryError),
}
