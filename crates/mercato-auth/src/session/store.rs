//! The user-store collaborator seam.

use async_trait::async_trait;

use mercato_core::result::AppResult;
use mercato_entity::user::User;

/// Read-only lookup capability supplied by the external user store.
///
/// The auth core never writes through this seam; registration and
/// deactivation are owned by the collaborator. Both lookups are filtered
/// to active accounts at the store, so a deactivated account is
/// indistinguishable from an absent one. Implementations may suspend on
/// I/O; a store fault must surface as its own error kind (transient or
/// internal), never as an authentication failure.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Point-in-time read of an active account by its email identifier.
    async fn find_active_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Active-account lookup for the login flow. The returned record
    /// carries the stored password hash for verification.
    async fn find_for_login(&self, email: &str) -> AppResult<Option<User>>;
}
