//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::UserRole;

/// A registered user in the Mercato marketplace.
///
/// Owned by the external user store; the auth core only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address, also the login identifier and token subject.
    pub email: String,
    /// Argon2id password hash. Never serialized outward.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Marketplace role (RBAC).
    pub role: UserRole,
    /// Whether the account may authenticate. Deactivation takes effect on
    /// the next request because principals are resolved fresh each time.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
}
