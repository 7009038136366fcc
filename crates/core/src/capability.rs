//! Capability gate: role resolution and the operation permission table.
//!
//! This module is pure. It turns a presented role literal into a [`Role`]
//! and answers whether a role may perform an [`Operation`]. Services call
//! [`Role::authorize`] before any side effect.

use crate::types::Role;

/// Errors produced by the capability gate.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The presented credential is not a known role.
    #[error("invalid role")]
    InvalidRole,
    /// The role is known but not permitted to perform the operation.
    #[error("role {role} may not {operation}")]
    Forbidden {
        /// Role that attempted the operation.
        role: Role,
        /// Operation that was attempted.
        operation: Operation,
    },
}

/// Every protected operation exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreatePickupPoint,
    ListPickupPoints,
    OpenReception,
    CloseReception,
    AddProduct,
    DeleteLastProduct,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::CreatePickupPoint,
        Self::ListPickupPoints,
        Self::OpenReception,
        Self::CloseReception,
        Self::AddProduct,
        Self::DeleteLastProduct,
    ];

    /// Roles allowed to perform this operation.
    #[must_use]
    pub const fn permitted_roles(self) -> &'static [Role] {
        match self {
            Self::CreatePickupPoint => &[Role::Moderator],
            Self::ListPickupPoints => &[Role::Employee, Role::Moderator],
            Self::OpenReception
            | Self::CloseReception
            | Self::AddProduct
            | Self::DeleteLastProduct => &[Role::Employee],
        }
    }

    const fn describe(self) -> &'static str {
        match self {
            Self::CreatePickupPoint => "create pickup points",
            Self::ListPickupPoints => "list pickup points",
            Self::OpenReception => "open receptions",
            Self::CloseReception => "close receptions",
            Self::AddProduct => "add products",
            Self::DeleteLastProduct => "delete products",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Resolve a role literal into a [`Role`].
///
/// Only the exact strings `moderator` and `employee` are accepted.
///
/// ```
/// use pvz_core::{Role, capability::resolve};
///
/// assert_eq!(resolve("employee"), Ok(Role::Employee));
/// assert!(resolve("Employee").is_err());
/// ```
///
/// # Errors
///
/// Returns `CapabilityError::InvalidRole` for anything else.
pub fn resolve(credential: &str) -> Result<Role, CapabilityError> {
    match credential {
        "moderator" => Ok(Role::Moderator),
        "employee" => Ok(Role::Employee),
        _ => Err(CapabilityError::InvalidRole),
    }
}

impl std::str::FromStr for Role {
    type Err = CapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

impl Role {
    /// Whether this role may perform `operation`.
    #[must_use]
    pub fn can(self, operation: Operation) -> bool {
        operation.permitted_roles().contains(&self)
    }

    /// Check this role against the permission table.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError::Forbidden` if the role is not permitted.
    pub fn authorize(self, operation: Operation) -> Result<(), CapabilityError> {
        if self.can(operation) {
            Ok(())
        } else {
            Err(CapabilityError::Forbidden {
                role: self,
                operation,
            })
        }
    }
}
