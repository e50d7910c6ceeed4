//! OpenAPI Document for the Folio API
//!
//! Generated with utoipa from the route annotations and the schema derives
//! in folio-core and this crate.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::{DatabaseCheck, HealthReport, HealthStatus};
use crate::routes::theme::{SelectThemeRequest, ThemeStateResponse};
use crate::routes::{health, profile, projects, skills, theme};

use folio_core::{
    ContactInfo, EthosItem, Location, Profile, Project, ProjectLink, ProjectPhotos,
    ProjectSkills, ServiceItem, Skill, SkillCategory, ThemeMetadata, ThemeMode, ThemeSelection,
};

/// OpenAPI document for the Folio API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio API",
        version = "0.1.0",
        description = "Read-only portfolio content and cookie-backed theme selection",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Content", description = "Profile, skills and projects"),
        (name = "Theme", description = "Theme selection persisted in cookies"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    paths(
        // === Content Routes ===
        profile::get_profile,
        skills::list_skills,
        projects::list_projects,
        projects::get_project,

        // === Theme Routes ===
        theme::get_theme,
        theme::select_theme,
        theme::toggle_theme,
        theme::list_themes,

        // === Health Routes ===
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(
        schemas(
            // === Error Types ===
            ApiError, ErrorCode,

            // === Content Types ===
            Profile, Location, ServiceItem, EthosItem, ContactInfo,
            Skill, SkillCategory,
            Project, ProjectPhotos, ProjectSkills, ProjectLink,

            // === Theme Types ===
            ThemeMode, ThemeSelection, ThemeMetadata,
            SelectThemeRequest, ThemeStateResponse,

            // === Health Types ===
            HealthReport, HealthStatus, DatabaseCheck
        )
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Render the OpenAPI document as pretty JSON.
    pub fn to_json() -> Result<String, serde_json::Error> {
        let openapi = Self::openapi();
        serde_json::to_string_pretty(&openapi)
    }
}
