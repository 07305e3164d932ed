//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse for AppError` implementation and the
//! [`ApiErrorResponse`] body live in `mercato-core` alongside `AppError`
//! itself (Rust's orphan rule requires the impl to sit in the crate that
//! defines the type). They are re-exported here so the HTTP-boundary
//! surface stays under `mercato_api::error`.

pub use mercato_core::error::ApiErrorResponse;
