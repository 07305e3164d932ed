//! Role-gated dashboard handlers.
//!
//! Each endpoint declares its required role set statically and runs the
//! two-step pipeline explicitly: the extractor verifies the session, the
//! gate checks role membership, and the handler answers with the acting
//! identity.

use axum::Json;
use axum::extract::State;

use mercato_auth::rbac::{ADMINS, BUYERS, SELLERS};
use mercato_core::error::AppError;

use crate::dto::response::IdentityResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/dashboard/buyer
pub async fn buyer(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<IdentityResponse>, AppError> {
    let principal = state.gate.check(auth.into_principal(), &BUYERS)?;
    Ok(Json(IdentityResponse::from(principal)))
}

/// GET /api/dashboard/seller
pub async fn seller(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<IdentityResponse>, AppError> {
    let principal = state.gate.check(auth.into_principal(), &SELLERS)?;
    Ok(Json(IdentityResponse::from(principal)))
}

/// GET /api/dashboard/admin
pub async fn admin(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<IdentityResponse>, AppError> {
    let principal = state.gate.check(auth.into_principal(), &ADMINS)?;
    Ok(Json(IdentityResponse::from(principal)))
}
