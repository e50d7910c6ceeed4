//! Theme Selection REST API Routes
//!
//! The server has no durable store of its own: the selection lives in the
//! `theme-name`/`theme-mode` cookies. Each request rebuilds a
//! [`PersistedSelection`] over a cookie-backed store and answers with the
//! resolved theme plus any `Set-Cookie` headers the change produced.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    routing::{get, post},
    Json, Router,
};
use folio_core::{ThemeMetadata, ThemeMode, TokenMap};
use folio_storage::{AttributeSink, CookieStore, KeyValueStore, PersistedSelection};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, ThemeState};

// ============================================================================
// TYPES
// ============================================================================

/// Request body for PUT /api/theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SelectThemeRequest {
    pub name: String,
    /// "light" or "dark". Missing or unrecognized values mean dark.
    #[serde(default)]
    pub mode: Option<String>,
}

/// The resolved selection as the rendering layer consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ThemeStateResponse {
    pub name: String,
    pub mode: ThemeMode,
    /// e.g. `galaxy--dark`
    pub composite_key: String,
    /// Document attributes (`data-theme`, `data-theme-name`).
    pub attributes: BTreeMap<String, String>,
    /// Tokens of the active variant; absent if the theme lacks it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenMap>,
}

/// Cookie store, selection and sink for one request.
struct RequestSelection {
    cookies: Arc<CookieStore>,
    sink: Arc<AttributeSink>,
    selection: PersistedSelection,
}

impl RequestSelection {
    fn open(theme: &ThemeState, headers: &HeaderMap) -> Self {
        let cookie_header = headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok());
        let cookies = Arc::new(CookieStore::from_header(
            cookie_header,
            theme.cookie_options.clone(),
        ));
        let sink = Arc::new(AttributeSink::new());
        let backends: Vec<Arc<dyn KeyValueStore>> = vec![cookies.clone()];
        let selection = PersistedSelection::initialize(theme.table.clone(), backends, sink.clone());
        Self {
            cookies,
            sink,
            selection,
        }
    }

    fn response(&self) -> ThemeStateResponse {
        let current = self.selection.current();
        ThemeStateResponse {
            name: current.name.clone(),
            mode: current.mode,
            composite_key: current.composite_key(),
            attributes: self.sink.attributes(),
            tokens: self.selection.tokens().cloned(),
        }
    }

    fn set_cookie_headers(&self) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let values = self
            .cookies
            .set_cookie_headers()
            .map_err(|e| ApiError::internal_error(e.to_string()))?;
        for value in values {
            let value = HeaderValue::from_str(&value)
                .map_err(|e| ApiError::internal_error(format!("Invalid cookie header: {}", e)))?;
            headers.append(header::SET_COOKIE, value);
        }
        Ok(headers)
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /api/theme - Current selection resolved from request cookies
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/theme",
    tag = "Theme",
    responses(
        (status = 200, description = "Current theme selection", body = ThemeStateResponse),
    ),
))]
pub async fn get_theme(
    State(theme): State<Arc<ThemeState>>,
    headers: HeaderMap,
) -> Json<ThemeStateResponse> {
    Json(RequestSelection::open(&theme, &headers).response())
}

/// PUT /api/theme - Select a theme and persist it in cookies
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/api/theme",
    tag = "Theme",
    request_body = SelectThemeRequest,
    responses(
        (status = 200, description = "Theme selected; Set-Cookie carries the new selection", body = ThemeStateResponse),
        (status = 400, description = "Unknown theme name", body = ApiError),
    ),
))]
pub async fn select_theme(
    State(theme): State<Arc<ThemeState>>,
    headers: HeaderMap,
    Json(req): Json<SelectThemeRequest>,
) -> ApiResult<(HeaderMap, Json<ThemeStateResponse>)> {
    if req.name.trim().is_empty() {
        return Err(ApiError::missing_field("name"));
    }

    let mut request = RequestSelection::open(&theme, &headers);
    if !request.selection.select(&req.name, req.mode.as_deref()) {
        return Err(ApiError::invalid_theme_name(&req.name));
    }

    Ok((request.set_cookie_headers()?, Json(request.response())))
}

/// POST /api/theme/toggle - Flip light/dark for the current theme
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/theme/toggle",
    tag = "Theme",
    responses(
        (status = 200, description = "Mode toggled; Set-Cookie carries the new selection", body = ThemeStateResponse),
    ),
))]
pub async fn toggle_theme(
    State(theme): State<Arc<ThemeState>>,
    headers: HeaderMap,
) -> ApiResult<(HeaderMap, Json<ThemeStateResponse>)> {
    let mut request = RequestSelection::open(&theme, &headers);
    if !request.selection.toggle_mode() {
        // Only reachable if the table lost the current theme.
        return Err(ApiError::internal_error("Failed to toggle theme mode"));
    }
    Ok((request.set_cookie_headers()?, Json(request.response())))
}

/// GET /api/themes - Metadata for every available theme
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/themes",
    tag = "Theme",
    responses(
        (status = 200, description = "Available themes in display order", body = Vec<ThemeMetadata>),
    ),
))]
pub async fn list_themes(State(theme): State<Arc<ThemeState>>) -> Json<Vec<ThemeMetadata>> {
    Json(theme.table.iter().map(|entry| entry.metadata()).collect())
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/theme", get(get_theme).put(select_theme))
        .route("/theme/toggle", post(toggle_theme))
        .route("/themes", get(list_themes))
}
