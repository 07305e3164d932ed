//! # mercato-auth
//!
//! Authentication and authorization core for the Mercato marketplace API.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and verification
//! - `jwt` — signed access/refresh token issuance and parsing
//! - `session` — per-request bearer verification, login and refresh flows,
//!   and the `UserStore` collaborator seam
//! - `rbac` — declarative role sets and the permission gate
//!
//! Verification is stateless: each request is a pure function of the token,
//! a single clock read, and a point-in-time read of the user store. There
//! is no shared mutable state and no lock anywhere in this crate.

pub mod jwt;
pub mod password;
pub mod principal;
pub mod rbac;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenKind, TokenPair};
pub use password::PasswordHasher;
pub use principal::Principal;
pub use rbac::{PermissionGate, RoleSet};
pub use session::{RefreshGrant, SessionManager, SessionVerifier, UserStore};
