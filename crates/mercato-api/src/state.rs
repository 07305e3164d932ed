//! Application state shared across all handlers.

use std::sync::Arc;

use mercato_auth::jwt::{JwtDecoder, JwtEncoder};
use mercato_auth::password::PasswordHasher;
use mercato_auth::rbac::PermissionGate;
use mercato_auth::session::{SessionManager, SessionVerifier};
use mercato_core::config::AppConfig;

use crate::store::MemoryUserStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; nothing here is mutable
/// after construction except the user store's own interior map.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// In-memory user store (the collaborator stand-in).
    pub users: Arc<MemoryUserStore>,
    /// Password hasher (Argon2id).
    pub hasher: Arc<PasswordHasher>,
    /// Token encoder.
    pub encoder: Arc<JwtEncoder>,
    /// Login and refresh flows.
    pub sessions: Arc<SessionManager>,
    /// Per-request bearer verification.
    pub verifier: Arc<SessionVerifier>,
    /// Role-membership enforcement.
    pub gate: Arc<PermissionGate>,
}

impl AppState {
    /// Wires the full dependency graph from configuration.
    pub fn new(config: AppConfig) -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let hasher = Arc::new(PasswordHasher::new());
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));

        let sessions = Arc::new(SessionManager::new(
            encoder.clone(),
            decoder.clone(),
            hasher.clone(),
            users.clone(),
            &config.auth,
        ));
        let verifier = Arc::new(SessionVerifier::new(decoder, users.clone()));

        Self {
            config: Arc::new(config),
            users,
            hasher,
            encoder,
            sessions,
            verifier,
            gate: Arc::new(PermissionGate::new()),
        }
    }
}
