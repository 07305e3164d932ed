//! Bearer token verification — resolves a token to a live principal.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use mercato_core::error::AppError;

use crate::jwt::{JwtDecoder, TokenKind};
use crate::principal::Principal;

use super::store::UserStore;

/// Verifies bearer tokens and resolves them to active principals.
///
/// Terminal in one step per request: parse the token, look the subject up,
/// return the principal or fail. A deactivated or deleted account fails
/// exactly like a forged token so callers cannot enumerate accounts.
#[derive(Clone)]
pub struct SessionVerifier {
    /// Token decoder.
    decoder: Arc<JwtDecoder>,
    /// External user store.
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionVerifier")
            .field("decoder", &self.decoder)
            .finish()
    }
}

impl SessionVerifier {
    /// Creates a new verifier.
    pub fn new(decoder: Arc<JwtDecoder>, users: Arc<dyn UserStore>) -> Self {
        Self { decoder, users }
    }

    /// Verifies an access token and resolves the embedded subject to an
    /// active user.
    ///
    /// Error outcomes:
    /// - `ExpiredSession` — valid signature, past expiry; the caller may
    ///   retry via the refresh flow instead of re-authenticating.
    /// - `BadCredentials` — any other token problem, or no matching
    ///   active account.
    ///
    /// Store faults propagate with their own kind; an infrastructure
    /// outage must not read as invalid credentials.
    pub async fn verify_bearer(&self, token: &str) -> Result<Principal, AppError> {
        // One clock read per verification.
        let now = Utc::now();

        let claims = self.decoder.parse_kind(token, TokenKind::Access, now)?;

        let user = self
            .users
            .find_active_by_email(&claims.sub)
            .await?
            .ok_or_else(|| {
                debug!(sub = %claims.sub, "No active account for token subject");
                AppError::bad_credentials()
            })?;

        Ok(Principal::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use async_trait::async_trait;
    use chrono::Duration;
    use mercato_core::config::auth::AuthConfig;
    use mercato_core::error::ErrorKind;
    use mercato_core::result::AppResult;
    use mercato_entity::user::{User, UserRole};
    use uuid::Uuid;

    struct FixedStore {
        user: Option<User>,
    }

    #[async_trait]
    impl UserStore for FixedStore {
        async fn find_active_by_email(&self, email: &str) -> AppResult<Option<User>> {
            Ok(self.user.clone().filter(|u| u.email == email && u.is_active))
        }

        async fn find_for_login(&self, email: &str) -> AppResult<Option<User>> {
            self.find_active_by_email(email).await
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl UserStore for BrokenStore {
        async fn find_active_by_email(&self, _email: &str) -> AppResult<Option<User>> {
            Err(AppError::service_unavailable("user store timed out"))
        }

        async fn find_for_login(&self, _email: &str) -> AppResult<Option<User>> {
            Err(AppError::service_unavailable("user store timed out"))
        }
    }

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: "verifier-test-secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
            rotate_refresh: false,
        }
    }

    fn test_user(active: bool) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            role: UserRole::Buyer,
            is_active: active,
            created_at: now,
            updated_at: now,
        }
    }

    fn verifier_with(store: impl UserStore, config: &AuthConfig) -> SessionVerifier {
        SessionVerifier::new(Arc::new(JwtDecoder::new(config)), Arc::new(store))
    }

    #[tokio::test]
    async fn test_valid_token_resolves_principal() {
        let config = test_config();
        let user = test_user(true);
        let (token, _) = JwtEncoder::new(&config)
            .issue(&user, TokenKind::Access, Utc::now())
            .unwrap();

        let verifier = verifier_with(FixedStore { user: Some(user.clone()) }, &config);
        let principal = verifier.verify_bearer(&token).await.unwrap();

        assert_eq!(principal.id, user.id);
        assert_eq!(principal.email, "alice@example.com");
        assert_eq!(principal.role, UserRole::Buyer);
    }

    #[tokio::test]
    async fn test_deactivated_account_reads_as_bad_credentials() {
        let config = test_config();
        let user = test_user(false);
        let (token, _) = JwtEncoder::new(&config)
            .issue(&user, TokenKind::Access, Utc::now())
            .unwrap();

        let verifier = verifier_with(FixedStore { user: Some(user) }, &config);
        let err = verifier.verify_bearer(&token).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::BadCredentials);
    }

    #[tokio::test]
    async fn test_refresh_token_rejected_on_access_path() {
        let config = test_config();
        let user = test_user(true);
        let (token, _) = JwtEncoder::new(&config)
            .issue(&user, TokenKind::Refresh, Utc::now())
            .unwrap();

        let verifier = verifier_with(FixedStore { user: Some(user) }, &config);
        let err = verifier.verify_bearer(&token).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::BadCredentials);
    }

    #[tokio::test]
    async fn test_expired_token_reads_as_expired_session() {
        let config = test_config();
        let user = test_user(true);
        let issued = Utc::now() - Duration::hours(2);
        let (token, _) = JwtEncoder::new(&config)
            .issue(&user, TokenKind::Access, issued)
            .unwrap();

        let verifier = verifier_with(FixedStore { user: Some(user) }, &config);
        let err = verifier.verify_bearer(&token).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::ExpiredSession);
    }

    #[tokio::test]
    async fn test_store_outage_is_not_an_auth_failure() {
        let config = test_config();
        let user = test_user(true);
        let (token, _) = JwtEncoder::new(&config)
            .issue(&user, TokenKind::Access, Utc::now())
            .unwrap();

        let verifier = verifier_with(BrokenStore, &config);
        let err = verifier.verify_bearer(&token).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }
}
