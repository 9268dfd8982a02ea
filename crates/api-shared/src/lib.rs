//! # API Shared
//!
//! Shared utilities and definitions for the clinic APIs.
//!
//! Contains:
//! - Wire request/response types (`dto` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`; record types themselves come from `clinic-core`.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
