//! # API Shared
//!
//! Shared definitions for the Berani APIs.
//!
//! Contains:
//! - JSON wire types (`types` module)
//! - Shared services like `HealthService`
//!
//! Used by `berani-core` and `api-rest` for common functionality.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
