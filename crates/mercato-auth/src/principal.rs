//! The verified per-request identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mercato_entity::user::{User, UserRole};

/// The verified identity and role resolved for the current request.
///
/// Constructed fresh on every request from decoded claims plus a
/// point-in-time user lookup — never cached across requests — so that
/// deactivation or a role change takes effect on the next request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Unique, stable subject identifier.
    pub id: Uuid,
    /// Email address (the token subject).
    pub email: String,
    /// Marketplace role.
    pub role: UserRole,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
        }
    }
}
