//! # mercato-entity
//!
//! Domain entity models for Mercato. Every struct in this crate represents
//! a record owned by the external user store or a domain value object. All
//! entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod user;
