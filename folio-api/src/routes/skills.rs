//! Skills REST API Route

use axum::{extract::State, routing::get, Json, Router};
use folio_core::Skill;

use crate::db::DbClient;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/skills - Active skills ordered by category, then name
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/skills",
    tag = "Content",
    responses(
        (status = 200, description = "Active skills", body = Vec<Skill>),
        (status = 500, description = "Database failure", body = crate::error::ApiError),
    ),
))]
pub async fn list_skills(State(db): State<DbClient>) -> ApiResult<Json<Vec<Skill>>> {
    let skills = db.skills_list_active().await?;
    tracing::debug!(count = skills.len(), "Listed skills");
    Ok(Json(skills))
}

pub fn create_router() -> Router<AppState> {
    Router::new().route("/", get(list_skills))
}
