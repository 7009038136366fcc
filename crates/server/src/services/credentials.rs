//! Bearer credentials.
//!
//! The API authenticates callers with an opaque bearer token that resolves to a
//! [`Role`]. [`StaticRoleAuthority`] uses the role literal itself as the token,
//! which is what `/dummyLogin` hands out.

use pvz_core::{CapabilityError, Role, capability};

/// Issues and verifies bearer credentials.
pub trait CredentialAuthority: Send + Sync {
    /// Issue a credential for `role`.
    fn issue(&self, role: Role) -> String;

    /// Resolve a credential back to the role it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError::InvalidRole` if the credential is not recognised.
    fn verify(&self, token: &str) -> Result<Role, CapabilityError>;
}

/// Credential authority whose tokens are the role names themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRoleAuthority;

impl CredentialAuthority for StaticRoleAuthority {
    fn issue(&self, role: Role) -> String {
        role.as_str().to_owned()
    }

    fn verify(&self, token: &str) -> Result<Role, CapabilityError> {
        capability::resolve(token)
    }
}
