//! Projects REST API Routes

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use folio_core::Project;

use crate::db::DbClient;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/projects - Active projects, oldest first
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/projects",
    tag = "Content",
    responses(
        (status = 200, description = "Active projects", body = Vec<Project>),
        (status = 500, description = "Database failure", body = ApiError),
    ),
))]
pub async fn list_projects(State(db): State<DbClient>) -> ApiResult<Json<Vec<Project>>> {
    let projects = db.projects_list_active().await?;
    tracing::debug!(count = projects.len(), "Listed projects");
    Ok(Json(projects))
}

/// GET /api/projects/{code} - One project by its unique code
///
/// Inactive projects are still reachable by code.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/projects/{code}",
    tag = "Content",
    params(
        ("code" = String, Path, description = "Project code")
    ),
    responses(
        (status = 200, description = "Project", body = Project),
        (status = 400, description = "Blank project code", body = ApiError),
        (status = 404, description = "Unknown project code", body = ApiError),
        (status = 500, description = "Database failure", body = ApiError),
    ),
))]
pub async fn get_project(
    State(db): State<DbClient>,
    Path(code): Path<String>,
) -> ApiResult<Json<Project>> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ApiError::missing_field("code"));
    }

    db.project_get_by_code(code)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::project_not_found(code))
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects))
        .route("/:code", get(get_project))
}
