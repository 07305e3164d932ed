//! Login and refresh flows — credential checks in, token pairs out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use mercato_core::config::auth::AuthConfig;
use mercato_core::error::AppError;

use crate::jwt::{JwtDecoder, JwtEncoder, TokenKind, TokenPair};
use crate::password::PasswordHasher;

use super::store::UserStore;

/// Result of a successful refresh.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RefreshGrant {
    /// Newly minted access token.
    pub access_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Replacement refresh token, present only when rotation is enabled.
    pub refresh_token: Option<String>,
}

/// Runs the login and refresh flows.
///
/// Stateless: concurrent logins or refreshes by the same principal are
/// independent and each produces its own independently-expiring tokens.
#[derive(Clone)]
pub struct SessionManager {
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Token decoder.
    decoder: Arc<JwtDecoder>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// External user store.
    users: Arc<dyn UserStore>,
    /// Whether refresh mints a replacement refresh token.
    rotate_refresh: bool,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("rotate_refresh", &self.rotate_refresh)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        hasher: Arc<PasswordHasher>,
        users: Arc<dyn UserStore>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            encoder,
            decoder,
            hasher,
            users,
            rotate_refresh: config.rotate_refresh,
        }
    }

    /// Authenticates a user by email and password and mints a fresh
    /// access + refresh token pair.
    ///
    /// An unknown email and a wrong password fail identically with
    /// `IncorrectCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = self
            .users
            .find_for_login(email)
            .await?
            .ok_or_else(AppError::incorrect_credentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            debug!(user_id = %user.id, "Password verification failed at login");
            return Err(AppError::incorrect_credentials());
        }

        let now = Utc::now();
        let pair = self.encoder.issue_pair(&user, now)?;

        info!(user_id = %user.id, role = %user.role, "Login succeeded");

        Ok(pair)
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The presented token must parse, carry `kind = refresh`, be
    /// unexpired, and resolve to an active account; every one of those
    /// failures surfaces as `RefreshInvalid`, telling the client that a
    /// full re-login is required. Store faults keep their own kind.
    ///
    /// When rotation is enabled the grant also carries a replacement
    /// refresh token minted at the same instant.
    pub async fn refresh(&self, token: &str) -> Result<RefreshGrant, AppError> {
        let now = Utc::now();

        let claims = self
            .decoder
            .parse_kind(token, TokenKind::Refresh, now)
            .map_err(as_refresh_failure)?;

        let user = self
            .users
            .find_active_by_email(&claims.sub)
            .await?
            .ok_or_else(AppError::refresh_invalid)?;

        let (access_token, access_expires_at) = self.encoder.issue(&user, TokenKind::Access, now)?;

        let refresh_token = if self.rotate_refresh {
            let (rotated, _) = self.encoder.issue(&user, TokenKind::Refresh, now)?;
            Some(rotated)
        } else {
            None
        };

        info!(user_id = %user.id, rotated = self.rotate_refresh, "Access token refreshed");

        Ok(RefreshGrant {
            access_token,
            access_expires_at,
            refresh_token,
        })
    }
}

/// Collapses authentication-kind parse failures into `RefreshInvalid`
/// while letting infrastructure faults pass through unchanged.
fn as_refresh_failure(err: AppError) -> AppError {
    if err.kind.is_authentication() {
        AppError::refresh_invalid()
    } else {
        err
    }
}
