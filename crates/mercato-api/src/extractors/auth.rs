//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, verifies it, and injects the resolved principal.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use mercato_auth::principal::Principal;
use mercato_core::error::AppError;

use crate::state::AppState;

/// Extracted authenticated principal available in handlers.
///
/// A missing or malformed Authorization header fails with the same
/// generic bad-credentials error as a forged token, before the verifier
/// runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    /// Consumes the extractor, returning the inner principal.
    pub fn into_principal(self) -> Principal {
        self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(AppError::bad_credentials)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(AppError::bad_credentials)?;

        let principal = state.verifier.verify_bearer(token).await?;

        Ok(AuthUser(principal))
    }
}
