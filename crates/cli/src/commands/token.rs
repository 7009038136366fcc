//! Print the bearer token the server issues for a role.

use pvz_core::capability;
use pvz_server::services::{CredentialAuthority, StaticRoleAuthority};

use super::CommandError;

/// Issue a token for `role`.
///
/// # Errors
///
/// Returns `CommandError::Role` if `role` is not `moderator` or `employee`.
pub fn issue(role: &str) -> Result<String, CommandError> {
    let role = capability::resolve(role)?;
    Ok(StaticRoleAuthority.issue(role))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_known_roles() {
        assert_eq!(issue("employee").unwrap(), "employee");
        assert_eq!(issue("moderator").unwrap(), "moderator");
    }

    #[test]
    fn test_issue_rejects_unknown_role() {
        assert!(matches!(issue("admin"), Err(CommandError::Role(_))));
    }
}
