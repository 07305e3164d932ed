//! Auth handlers — register, login, refresh, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;
use validator::Validate;

use mercato_core::error::AppError;
use mercato_entity::user::{CreateUser, UserRole};

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{IdentityResponse, LoginResponse, RefreshResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
///
/// Registration is collaborator-owned: the handler hashes the password
/// and hands the record to the user store. Self-registration is limited
/// to the buyer and seller roles.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let role: UserRole = req.role.parse()?;
    if role == UserRole::Admin {
        return Err(AppError::validation(
            "Admin accounts cannot be self-registered",
        ));
    }

    let password_hash = state.hasher.hash(&req.password)?;

    let user = state.users.create(CreateUser {
        email: req.email,
        password_hash,
        role,
    })?;

    info!(user_id = %user.id, role = %user.role, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let pair = state.sessions.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: "bearer".to_string(),
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    let grant = state.sessions.refresh(&req.refresh_token).await?;

    Ok(Json(RefreshResponse {
        access_token: grant.access_token,
        token_type: "bearer".to_string(),
        refresh_token: grant.refresh_token,
    }))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<IdentityResponse> {
    Json(IdentityResponse::from(auth.into_principal()))
}
