//! In-memory user store — the collaborator side of the `UserStore` seam.
//!
//! Stands in for the external user service that owns registration and
//! deactivation. The auth core only ever reads through the [`UserStore`]
//! trait; the write operations here are collaborator-owned and never
//! called from `mercato-auth`.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use mercato_auth::session::store::UserStore;
use mercato_core::error::AppError;
use mercato_core::result::AppResult;
use mercato_entity::user::{CreateUser, User};

/// Concurrent in-memory user store keyed by lowercased email.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<String, User>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Registers a new user. Fails with `Conflict` when the email is
    /// already taken; the entry API makes the check-and-insert atomic
    /// under concurrent registration.
    pub fn create(&self, data: CreateUser) -> AppResult<User> {
        let key = data.email.to_lowercase();
        match self.users.entry(key) {
            Entry::Occupied(_) => Err(AppError::conflict("Email already registered")),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let user = User {
                    id: Uuid::new_v4(),
                    email: data.email,
                    password_hash: data.password_hash,
                    role: data.role,
                    is_active: true,
                    created_at: now,
                    updated_at: now,
                };
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    /// Deactivates an account. Returns `true` if a matching user existed.
    pub fn deactivate(&self, email: &str) -> bool {
        match self.users.get_mut(&email.to_lowercase()) {
            Some(mut user) => {
                user.is_active = false;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_active_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .get(&email.to_lowercase())
            .filter(|user| user.is_active)
            .map(|user| user.value().clone()))
    }

    async fn find_for_login(&self, email: &str) -> AppResult<Option<User>> {
        self.find_active_by_email(email).await
    }
}
