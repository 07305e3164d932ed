//! Token validation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use mercato_core::config::auth::AuthConfig;
use mercato_core::error::AppError;

use super::claims::{Claims, TokenKind};

/// Validates signed tokens.
///
/// The verification algorithm is pinned to HS256 at construction; a token
/// whose header names any other algorithm fails signature verification
/// outright — the token never selects its own verification key. Expiry is
/// checked here against the caller's single clock read, not inside the
/// JWT library, so "expired" is a distinct outcome from "invalid".
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration (signature and structure only).
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced in `parse` against an explicit `now`.
        validation.validate_exp = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Parses and validates a token: signature first, then expiry.
    ///
    /// Outcomes:
    /// - `Ok(claims)` — signature valid and `now` before expiry.
    /// - `ExpiredSession` — signature valid but `now` at or past expiry.
    /// - `BadCredentials` — bad signature, malformed structure, unsupported
    ///   algorithm, or a missing mandatory claim. One kind for all of
    ///   these, so a caller cannot probe which check failed.
    pub fn parse(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let claims = self.decode(token)?;

        if now.timestamp() >= claims.exp {
            return Err(AppError::expired_session());
        }

        Ok(claims)
    }

    /// Parses a token additionally required to be of the given kind.
    ///
    /// The kind check runs between signature verification and the expiry
    /// check: a token of the wrong kind is rejected as `BadCredentials`
    /// no matter whether it has expired, so an expired refresh token on
    /// the access path does not read as a refreshable session.
    pub fn parse_kind(
        &self,
        token: &str,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<Claims, AppError> {
        let claims = self.decode(token)?;

        if claims.kind != kind {
            debug!(expected = ?kind, actual = ?claims.kind, "Token kind mismatch");
            return Err(AppError::bad_credentials());
        }

        if now.timestamp() >= claims.exp {
            return Err(AppError::expired_session());
        }

        Ok(claims)
    }

    /// Signature and structure verification without the expiry check.
    fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                debug!(error = %e, "Token rejected");
                AppError::bad_credentials()
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use chrono::Duration;
    use mercato_core::config::auth::AuthConfig;
    use mercato_core::error::ErrorKind;
    use mercato_entity::user::{User, UserRole};
    use uuid::Uuid;

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: "unit-test-secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
            rotate_refresh: false,
        }
    }

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            role: UserRole::Buyer,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_issue_then_parse_returns_original_claims() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);
        let user = test_user();
        let now = Utc::now();

        let (token, expires_at) = encoder.issue(&user, TokenKind::Access, now).unwrap();
        let claims = decoder.parse(&token, now).unwrap();

        assert_eq!(claims.sub, user.email);
        assert_eq!(claims.uid, user.id);
        assert_eq!(claims.role, UserRole::Buyer);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_expired_token_is_expired_not_invalid() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);
        let user = test_user();

        let issued = Utc::now() - Duration::hours(1);
        let (token, _) = encoder.issue(&user, TokenKind::Access, issued).unwrap();

        let err = decoder.parse(&token, Utc::now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpiredSession);
    }

    #[test]
    fn test_tampered_signature_is_bad_credentials() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);
        let now = Utc::now();

        let (token, _) = encoder.issue(&test_user(), TokenKind::Access, now).unwrap();

        // Flip the last character of the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        let err = decoder.parse(&tampered, now).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadCredentials);
    }

    #[test]
    fn test_foreign_secret_is_bad_credentials() {
        let encoder = JwtEncoder::new(&AuthConfig {
            secret: "some-other-secret".to_string(),
            ..test_config()
        });
        let decoder = JwtDecoder::new(&test_config());
        let now = Utc::now();

        let (token, _) = encoder.issue(&test_user(), TokenKind::Access, now).unwrap();

        let err = decoder.parse(&token, now).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadCredentials);
    }

    #[test]
    fn test_garbage_token_is_bad_credentials() {
        let decoder = JwtDecoder::new(&test_config());
        let err = decoder.parse("not.a.token", Utc::now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadCredentials);
    }

    #[test]
    fn test_kind_mismatch_is_bad_credentials() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);
        let now = Utc::now();

        let (refresh, _) = encoder.issue(&test_user(), TokenKind::Refresh, now).unwrap();

        let err = decoder
            .parse_kind(&refresh, TokenKind::Access, now)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadCredentials);
    }

    #[test]
    fn test_expired_wrong_kind_stays_bad_credentials() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let issued = Utc::now() - Duration::days(30);
        let (refresh, _) = encoder.issue(&test_user(), TokenKind::Refresh, issued).unwrap();

        let err = decoder
            .parse_kind(&refresh, TokenKind::Access, Utc::now())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadCredentials);
    }
}
