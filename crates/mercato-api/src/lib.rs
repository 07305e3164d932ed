//! # mercato-api
//!
//! HTTP boundary for the Mercato marketplace API. Translates HTTP
//! requests into calls on the auth core and maps [`AppError`] kinds to
//! status codes: authentication failures become 401 responses carrying
//! the bearer challenge, authorization denials become 403.
//!
//! [`AppError`]: mercato_core::error::AppError

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod store;

pub use app::run_server;
pub use router::build_router;
pub use state::AppState;
pub use store::MemoryUserStore;
