//! Folio API - REST layer for the portfolio site
//!
//! Serves the profile, skills and projects stored in PostgreSQL, and a small
//! theme-selection surface whose only durable state is the visitor's cookies.

#[macro_use]
mod macros;

pub mod config;
pub mod db;
pub mod error;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::ApiConfig;
pub use db::{DbClient, DbConfig, SeedSummary};
pub use error::{ApiError, ApiResult, ErrorCode};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::{build_router, create_api_router};
pub use state::{AppState, ThemeState};
