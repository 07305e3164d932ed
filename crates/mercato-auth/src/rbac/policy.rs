//! Role-set declarations attached to protected operations.

use std::fmt;

use mercato_entity::user::UserRole;

/// An immutable, non-empty set of roles attached to a protected operation
/// at definition time.
///
/// Declared statically per operation (`const`), never computed from
/// request data. An empty declaration is rejected at const-evaluation
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet {
    roles: &'static [UserRole],
}

impl RoleSet {
    /// Declares a role set.
    pub const fn of(roles: &'static [UserRole]) -> Self {
        assert!(
            !roles.is_empty(),
            "a permission requirement must name at least one role"
        );
        Self { roles }
    }

    /// Membership test.
    pub fn contains(&self, role: UserRole) -> bool {
        self.roles.iter().any(|r| *r == role)
    }

    /// The declared roles.
    pub fn roles(&self) -> &'static [UserRole] {
        self.roles
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, role) in self.roles.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{role}")?;
        }
        Ok(())
    }
}

/// Buyer-only operations (placing orders, writing reviews).
pub const BUYERS: RoleSet = RoleSet::of(&[UserRole::Buyer]);

/// Seller-only operations (publishing and managing listings).
pub const SELLERS: RoleSet = RoleSet::of(&[UserRole::Seller]);

/// Admin-only operations (catalog and account management).
pub const ADMINS: RoleSet = RoleSet::of(&[UserRole::Admin]);

/// Operations open to any authenticated principal.
pub const ANY_ROLE: RoleSet = RoleSet::of(&[UserRole::Buyer, UserRole::Seller, UserRole::Admin]);
