//! Router tests driven through `tower::ServiceExt::oneshot`.
//!
//! The pool points at a closed local port. Theme and probe routes never
//! touch it; content routes and readiness hit the refused connection.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use folio_api::routes::theme::ThemeStateResponse;
use folio_api::{
    build_router, ApiConfig, ApiError, AppState, DbClient, DbConfig, ErrorCode, ThemeState,
};
use folio_core::{ThemeMetadata, ThemeMode, ThemeTable};
use folio_test_utils::fixtures::small_theme_table;
use std::time::Duration;
use tower::ServiceExt;

fn offline_db() -> DbClient {
    let config = DbConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        timeout: Duration::from_secs(5),
        ..DbConfig::default()
    };
    DbClient::from_config(&config).expect("lazy pool")
}

fn app_with_table(table: ThemeTable) -> Router {
    let config = ApiConfig::default();
    let theme = ThemeState::new(table, config.theme_cookie.clone());
    build_router(AppState::new(offline_db(), theme), &config)
}

fn app() -> Router {
    app_with_table(ThemeTable::builtin())
}

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("valid JSON body")
}

fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

fn put_theme(body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PUT")
        .uri("/api/theme")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

// ============================================================================
// THEME ROUTES
// ============================================================================

#[tokio::test]
async fn theme_defaults_without_cookies() {
    let response = app().oneshot(get("/api/theme", None)).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());

    let state: ThemeStateResponse = body_json(response).await;
    assert_eq!(state.name, "cloud");
    assert_eq!(state.mode, ThemeMode::Dark);
    assert_eq!(state.composite_key, "cloud--dark");
    assert_eq!(state.attributes.get("data-theme").map(String::as_str), Some("dark"));
    assert_eq!(
        state.attributes.get("data-theme-name").map(String::as_str),
        Some("cloud")
    );
    assert!(state.tokens.is_some());
}

#[tokio::test]
async fn theme_reads_request_cookies() {
    let response = app()
        .oneshot(get("/api/theme", Some("theme-name=ocean; theme-mode=light")))
        .await
        .expect("response");
    let state: ThemeStateResponse = body_json(response).await;
    assert_eq!(state.composite_key, "ocean--light");
}

#[tokio::test]
async fn theme_ignores_unknown_cookie_values() {
    let response = app()
        .oneshot(get("/api/theme", Some("theme-name=neon; theme-mode=sepia")))
        .await
        .expect("response");
    let state: ThemeStateResponse = body_json(response).await;
    assert_eq!(state.composite_key, "cloud--dark");
}

#[tokio::test]
async fn select_theme_sets_both_cookies() {
    let response = app()
        .oneshot(put_theme(r#"{"name":"galaxy","mode":"light"}"#, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies
        .iter()
        .any(|c| c.starts_with("theme-mode=light; Path=/; Max-Age=31536000; SameSite=Lax")));
    assert!(cookies.iter().any(|c| c.starts_with("theme-name=galaxy;")));

    let state: ThemeStateResponse = body_json(response).await;
    assert_eq!(state.composite_key, "galaxy--light");
}

#[tokio::test]
async fn select_theme_without_mode_means_dark() {
    let response = app()
        .oneshot(put_theme(r#"{"name":"forest"}"#, Some("theme-mode=light")))
        .await
        .expect("response");
    let state: ThemeStateResponse = body_json(response).await;
    assert_eq!(state.mode, ThemeMode::Dark);
}

#[tokio::test]
async fn select_theme_coerces_invalid_mode() {
    let response = app()
        .oneshot(put_theme(r#"{"name":"sunset","mode":"sepia"}"#, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let state: ThemeStateResponse = body_json(response).await;
    assert_eq!(state.composite_key, "sunset--dark");
}

#[tokio::test]
async fn select_unknown_theme_is_rejected() {
    let response = app()
        .oneshot(put_theme(r#"{"name":"neon","mode":"light"}"#, Some("theme-name=ocean")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookies(&response).is_empty());

    let error: ApiError = body_json(response).await;
    assert_eq!(error.code, ErrorCode::InvalidThemeName);
}

#[tokio::test]
async fn select_blank_theme_is_missing_field() {
    let response = app()
        .oneshot(put_theme(r#"{"name":"  "}"#, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ApiError = body_json(response).await;
    assert_eq!(error.code, ErrorCode::MissingField);
}

#[tokio::test]
async fn toggle_flips_mode_and_keeps_name() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/theme/toggle")
        .header(header::COOKIE, "theme-name=galaxy; theme-mode=dark")
        .body(Body::empty())
        .expect("request");
    let response = app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("theme-mode=light;")));

    let state: ThemeStateResponse = body_json(response).await;
    assert_eq!(state.composite_key, "galaxy--light");
}

#[tokio::test]
async fn themes_lists_table_in_order() {
    let response = app_with_table(small_theme_table())
        .oneshot(get("/api/themes", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let themes: Vec<ThemeMetadata> = body_json(response).await;
    let names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["paper", "ink"]);
    assert_eq!(themes[1].display_name, "Ink");
    assert!(!themes[1].has_light_variant);
}

#[tokio::test]
async fn custom_table_without_cloud_falls_back_to_first_entry() {
    let response = app_with_table(small_theme_table())
        .oneshot(get("/api/theme", None))
        .await
        .expect("response");
    let state: ThemeStateResponse = body_json(response).await;
    assert_eq!(state.composite_key, "paper--dark");
}

#[tokio::test]
async fn missing_variant_has_no_tokens() {
    let response = app_with_table(small_theme_table())
        .oneshot(get("/api/theme", Some("theme-name=ink; theme-mode=light")))
        .await
        .expect("response");
    let state: ThemeStateResponse = body_json(response).await;
    assert_eq!(state.composite_key, "ink--light");
    assert!(state.tokens.is_none());
}

// ============================================================================
// CONTENT AND HEALTH ROUTES
// ============================================================================

#[tokio::test]
async fn blank_project_code_is_rejected() {
    let response = app()
        .oneshot(get("/api/projects/%20%20", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ApiError = body_json(response).await;
    assert_eq!(error.code, ErrorCode::MissingField);
}

#[tokio::test]
async fn content_routes_map_connection_failure_to_database_error() {
    for uri in [
        "/api/profile",
        "/api/skills",
        "/api/projects",
        "/api/projects/star-map",
    ] {
        let response = app().oneshot(get(uri, None)).await.expect("response");
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "status for {}",
            uri
        );
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, ErrorCode::DatabaseError, "code for {}", uri);
        assert_eq!(error.message, "Failed to acquire database connection");
    }
}

#[tokio::test]
async fn readiness_reports_unreachable_database() {
    let response = app().oneshot(get("/health/ready", None)).await.expect("response");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn ping_answers_pong() {
    let response = app().oneshot(get("/health/ping", None)).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    assert_eq!(&bytes[..], b"pong");
}

#[tokio::test]
async fn liveness_is_healthy() {
    let response = app().oneshot(get("/health/live", None)).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[cfg(feature = "openapi")]
#[tokio::test]
async fn openapi_document_is_served() {
    let response = app().oneshot(get("/openapi.json", None)).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let doc: serde_json::Value = body_json(response).await;
    assert_eq!(doc["info"]["title"], "Folio API");
}
