//! REST API Routes Module
//!
//! Includes:
//! - Content routes (profile, skills, projects) under /api
//! - Theme selection routes under /api
//! - Health check endpoints under /health
//! - OpenAPI document at /openapi.json
//! - CORS and request tracing layers

pub mod health;
pub mod profile;
pub mod projects;
pub mod skills;
pub mod theme;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use folio_core::ThemeTable;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::db::DbClient;
use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, ThemeState};

pub use health::create_router as health_router;
pub use profile::create_router as profile_router;
pub use projects::create_router as projects_router;
pub use skills::create_router as skills_router;
pub use theme::create_router as theme_router;

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

#[cfg(feature = "openapi")]
async fn openapi_json() -> impl axum::response::IntoResponse {
    use utoipa::OpenApi;
    axum::Json(crate::openapi::ApiDoc::openapi())
}

// ============================================================================
// PRODUCTION VALIDATION
// ============================================================================

fn is_production_environment() -> bool {
    std::env::var("FOLIO_ENVIRONMENT")
        .map(|e| matches!(e.to_lowercase().as_str(), "production" | "prod"))
        .unwrap_or(false)
}

fn validate_api_config_for_production(config: &ApiConfig) -> ApiResult<()> {
    if config.cors_origins.is_empty() {
        return Err(ApiError::invalid_input(
            "CORS origins not configured for production. Set FOLIO_CORS_ORIGINS.",
        ));
    }
    if !config.theme_cookie.secure {
        tracing::warn!("Theme cookies are not marked Secure in production");
    }
    Ok(())
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// Empty origins allow everything (development). Credentialed requests are
/// only enabled for an explicit origin list, since the theme routes rely on
/// cookies.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        if config.cors_allow_credentials {
            cors.allow_origin(origins).allow_credentials(true)
        } else {
            cors.allow_origin(origins)
        }
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Assemble every route over an already-built state.
pub fn build_router(state: AppState, api_config: &ApiConfig) -> Router {
    let api_routes = Router::new()
        .nest("/profile", profile::create_router())
        .nest("/skills", skills::create_router())
        .nest("/projects", projects::create_router())
        .merge(theme::create_router());

    #[allow(unused_mut)]
    let mut router = Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::create_router());

    #[cfg(feature = "openapi")]
    {
        router = router.route("/openapi.json", axum::routing::get(openapi_json));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(api_config))
        .with_state(state)
}

/// Create the complete API router with the builtin theme table.
///
/// In production (`FOLIO_ENVIRONMENT=production`) this refuses to start
/// without an explicit CORS origin list.
pub fn create_api_router(db: DbClient, api_config: &ApiConfig) -> ApiResult<Router> {
    if is_production_environment() {
        validate_api_config_for_production(api_config)?;
    }

    let theme = ThemeState::new(ThemeTable::builtin(), api_config.theme_cookie.clone());
    Ok(build_router(AppState::new(db, theme), api_config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_requires_origins() {
        let config = ApiConfig::default();
        let err = validate_api_config_for_production(&config).expect_err("origins are required");
        assert!(err.message.contains("FOLIO_CORS_ORIGINS"));

        let config = ApiConfig {
            cors_origins: vec!["https://folio.dev".to_string()],
            ..ApiConfig::default()
        };
        assert!(validate_api_config_for_production(&config).is_ok());
    }
}
