//! Permission gate — role-membership enforcement for protected operations.

use tracing::warn;

use mercato_core::error::AppError;

use crate::principal::Principal;

use super::policy::RoleSet;

/// Enforces that a verified principal's role belongs to an operation's
/// declared role set.
///
/// Pure membership test over an already-authenticated principal; a denial
/// is an authorization error, distinct from every authentication error.
#[derive(Debug, Clone)]
pub struct PermissionGate;

impl PermissionGate {
    /// Creates a new permission gate.
    pub fn new() -> Self {
        Self
    }

    /// Passes the principal through unchanged if its role is a member of
    /// `required`, otherwise fails with `AuthorizationDenied`.
    pub fn check(&self, principal: Principal, required: &RoleSet) -> Result<Principal, AppError> {
        if required.contains(principal.role) {
            Ok(principal)
        } else {
            warn!(
                user_id = %principal.id,
                role = %principal.role,
                required = %required,
                "Authorization denied"
            );
            Err(AppError::authorization_denied(
                "You're not authorized to perform this action",
            ))
        }
    }
}

impl Default for PermissionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::policy::{ANY_ROLE, SELLERS};
    use mercato_core::error::ErrorKind;
    use mercato_entity::user::UserRole;
    use uuid::Uuid;

    fn principal(role: UserRole) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_member_passes_through_unchanged() {
        let gate = PermissionGate::new();
        let seller = principal(UserRole::Seller);
        let id = seller.id;

        let passed = gate.check(seller, &SELLERS).unwrap();
        assert_eq!(passed.id, id);
    }

    #[test]
    fn test_non_member_is_denied() {
        let gate = PermissionGate::new();
        let err = gate.check(principal(UserRole::Buyer), &SELLERS).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AuthorizationDenied);
    }

    #[test]
    fn test_any_role_admits_all() {
        let gate = PermissionGate::new();
        for role in [UserRole::Buyer, UserRole::Seller, UserRole::Admin] {
            assert!(gate.check(principal(role), &ANY_ROLE).is_ok());
        }
    }
}
