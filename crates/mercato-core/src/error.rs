//! Unified application error types for Mercato.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
///
/// Authentication failures are deliberately split into several kinds: a
/// client distinguishes [`ErrorKind::ExpiredSession`] from
/// [`ErrorKind::BadCredentials`] to decide whether a token refresh is worth
/// attempting before forcing a full re-login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A bearer token was missing, malformed, unsigned, signed with the
    /// wrong key, or resolved to no active account. Intentionally one kind
    /// for all of these so callers cannot probe which check failed.
    BadCredentials,
    /// A well-formed, correctly signed access token past its expiry.
    ExpiredSession,
    /// The refresh operation was given a non-refresh, expired, or invalid
    /// token; the client must re-authenticate from scratch.
    RefreshInvalid,
    /// Login was attempted with an unknown identifier or wrong password.
    IncorrectCredentials,
    /// The caller is authenticated but its role does not permit the action.
    AuthorizationDenied,
    /// A conflict occurred (duplicate registration, concurrent modification).
    Conflict,
    /// Input validation failed.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// A collaborating service (e.g. the user store) is unavailable.
    ServiceUnavailable,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadCredentials => write!(f, "BAD_CREDENTIALS"),
            Self::ExpiredSession => write!(f, "EXPIRED_SESSION"),
            Self::RefreshInvalid => write!(f, "REFRESH_INVALID"),
            Self::IncorrectCredentials => write!(f, "INCORRECT_CREDENTIALS"),
            Self::AuthorizationDenied => write!(f, "AUTHORIZATION_DENIED"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

impl ErrorKind {
    /// Whether this kind is an authentication failure (401-class).
    ///
    /// Authorization denial is deliberately excluded: the caller is known
    /// and valid, merely insufficiently privileged.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            Self::BadCredentials
                | Self::ExpiredSession
                | Self::RefreshInvalid
                | Self::IncorrectCredentials
        )
    }
}

/// The unified application error used throughout Mercato.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a bad-credentials error with the canonical caller-facing
    /// message. Every token-verification failure surfaces this exact text.
    pub fn bad_credentials() -> Self {
        Self::new(ErrorKind::BadCredentials, "Could not validate credentials")
    }

    /// Create an expired-session error.
    pub fn expired_session() -> Self {
        Self::new(ErrorKind::ExpiredSession, "Token has expired")
    }

    /// Create a refresh-invalid error.
    pub fn refresh_invalid() -> Self {
        Self::new(ErrorKind::RefreshInvalid, "Could not validate refresh token")
    }

    /// Create an incorrect-credentials error for failed logins.
    pub fn incorrect_credentials() -> Self {
        Self::new(ErrorKind::IncorrectCredentials, "Incorrect email or password")
    }

    /// Create an authorization-denied error.
    pub fn authorization_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthorizationDenied, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::{HeaderValue, StatusCode, header};

        let status = match self.kind {
            ErrorKind::BadCredentials
            | ErrorKind::ExpiredSession
            | ErrorKind::RefreshInvalid
            | ErrorKind::IncorrectCredentials => StatusCode::UNAUTHORIZED,
            ErrorKind::AuthorizationDenied => StatusCode::FORBIDDEN,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Configuration | ErrorKind::Internal => {
                tracing::error!(error = %self.message, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            error: self.kind.to_string(),
            message: self.message,
        };

        let mut response = (status, axum::Json(body)).into_response();

        // 401 responses advertise the bearer-auth challenge.
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
