//! Probe endpoints under /health.
//!
//! `ping` and `live` never touch the database; `ready` runs `SELECT 1`.

use std::time::Instant;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::DbClient;
use crate::state::AppState;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Body of `/health/live` and `/health/ready`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    /// Only present on readiness checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseCheck>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DatabaseCheck {
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    fn new(start_time: Instant, database: Option<DatabaseCheck>) -> Self {
        let status = match &database {
            Some(check) => check.status,
            None => HealthStatus::Healthy,
        };
        Self {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: start_time.elapsed().as_secs(),
            database,
        }
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /health/ping
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/ping",
    tag = "Health",
    responses(
        (status = 200, description = "Plain-text pong", body = String),
    ),
))]
pub async fn ping() -> &'static str {
    "pong"
}

/// GET /health/live - Process is up
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Process is alive", body = HealthReport),
    ),
))]
pub async fn liveness(State(start_time): State<Instant>) -> Json<HealthReport> {
    Json(HealthReport::new(start_time, None))
}

/// GET /health/ready - Database reachable
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = HealthReport),
        (status = 503, description = "Database unreachable", body = HealthReport),
    ),
))]
pub async fn readiness(
    State(db): State<DbClient>,
    State(start_time): State<Instant>,
) -> (StatusCode, Json<HealthReport>) {
    let started = Instant::now();
    let check = match db.health_check().await {
        Ok(()) => DatabaseCheck {
            status: HealthStatus::Healthy,
            latency_ms: Some(started.elapsed().as_millis() as u64),
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            DatabaseCheck {
                status: HealthStatus::Unhealthy,
                latency_ms: None,
                error: Some(e.message),
            }
        }
    };

    let report = HealthReport::new(start_time, Some(check));
    let status_code = match report.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(report))
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}
