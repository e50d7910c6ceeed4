//! Profile REST API Route

use axum::{extract::State, routing::get, Json, Router};
use folio_core::Profile;

use crate::db::DbClient;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/profile - The site owner's profile
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/profile",
    tag = "Content",
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 404, description = "No profile has been seeded", body = ApiError),
        (status = 500, description = "Database failure", body = ApiError),
    ),
))]
pub async fn get_profile(State(db): State<DbClient>) -> ApiResult<Json<Profile>> {
    match db.profile_get().await? {
        Some(profile) => Ok(Json(profile)),
        None => {
            tracing::warn!("Profile requested but the profiles table is empty");
            Err(ApiError::profile_not_found())
        }
    }
}

pub fn create_router() -> Router<AppState> {
    Router::new().route("/", get(get_profile))
}
