//! Database Connection Pool Module
//!
//! PostgreSQL connection pooling using deadpool-postgres, plus the read
//! queries behind the content routes and the schema/seed operations used by
//! `folio-admin`.

use std::time::Duration;

use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use folio_core::{
    ContactInfo, EthosItem, Location, Profile, Project, ProjectLink, ProjectPhotos, ProjectSkills,
    Section, SeedData, ServiceItem, Skill, SkillCategory,
};
use std::collections::BTreeMap;
use tokio_postgres::types::Json;
use tokio_postgres::{NoTls, Row};

use crate::error::{ApiError, ApiResult};

/// Bundled schema, applied by `DbClient::migrate`.
pub const SCHEMA_SQL: &str = include_str!("../migrations/0001_init.sql");

const RESET_SQL: &str = "DROP TABLE IF EXISTS projects CASCADE;
DROP TABLE IF EXISTS profiles CASCADE;
DROP TABLE IF EXISTS skills CASCADE;";

const PROFILE_COLUMNS: &str = "id, first_name, last_name, title, pronouns, motto, location, bio, \
     services, ethos, contact, created_at, updated_at";

const SKILL_COLUMNS: &str = "id, name, icon, proficiency, category, is_active, created_at, updated_at";

const PROJECT_COLUMNS: &str = "id, project_code, category, title, subtitle, contents, is_active, \
     display_theme, photos, skills, links, created_at, updated_at";

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size
    pub max_size: usize,
    /// Wait/connect timeout
    pub timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "folio".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
            max_size: 16,
            timeout: Duration::from_secs(30),
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("FOLIO_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("FOLIO_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5432),
            dbname: std::env::var("FOLIO_DB_NAME").unwrap_or_else(|_| "folio".to_string()),
            user: std::env::var("FOLIO_DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("FOLIO_DB_PASSWORD").unwrap_or_default(),
            max_size: std::env::var("FOLIO_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(16),
            timeout: Duration::from_secs(
                std::env::var("FOLIO_DB_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    /// Create a connection pool from this configuration.
    ///
    /// No connection is opened until the first query.
    pub fn create_pool(&self) -> ApiResult<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());
        cfg.connect_timeout = Some(self.timeout);

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let mut pool_cfg = deadpool_postgres::PoolConfig::new(self.max_size);
        pool_cfg.timeouts.wait = Some(self.timeout);
        pool_cfg.timeouts.create = Some(self.timeout);
        cfg.pool = Some(pool_cfg);

        cfg.create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| ApiError::database_error(format!("Failed to create pool: {}", e)))
    }
}

// ============================================================================
// DATABASE CLIENT WRAPPER
// ============================================================================

/// Row counts written by [`DbClient::seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub skills: usize,
    pub projects: usize,
}

/// Database client wrapping the connection pool.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

impl DbClient {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub fn from_config(config: &DbConfig) -> ApiResult<Self> {
        let pool = config.create_pool()?;
        Ok(Self::new(pool))
    }

    /// Get the current pool size for observability.
    pub fn pool_size(&self) -> usize {
        self.pool.status().size
    }

    async fn get_conn(&self) -> ApiResult<deadpool_postgres::Object> {
        self.pool.get().await.map_err(ApiError::from)
    }

    /// Verify database connectivity.
    pub async fn health_check(&self) -> ApiResult<()> {
        let conn = self.get_conn().await?;
        conn.query_one("SELECT 1", &[]).await?;
        Ok(())
    }

    // ========================================================================
    // CONTENT QUERIES
    // ========================================================================

    /// The first profile row, if any.
    pub async fn profile_get(&self) -> ApiResult<Option<Profile>> {
        let conn = self.get_conn().await?;
        let sql = format!("SELECT {} FROM profiles ORDER BY id LIMIT 1", PROFILE_COLUMNS);
        let row = conn.query_opt(sql.as_str(), &[]).await?;
        row.as_ref().map(profile_from_row).transpose()
    }

    /// Active skills ordered by category, then name.
    pub async fn skills_list_active(&self) -> ApiResult<Vec<Skill>> {
        let conn = self.get_conn().await?;
        let sql = format!(
            "SELECT {} FROM skills WHERE is_active = 1 ORDER BY category, name",
            SKILL_COLUMNS
        );
        let rows = conn.query(sql.as_str(), &[]).await?;
        rows.iter().map(skill_from_row).collect()
    }

    /// Active projects, oldest first.
    pub async fn projects_list_active(&self) -> ApiResult<Vec<Project>> {
        let conn = self.get_conn().await?;
        let sql = format!(
            "SELECT {} FROM projects WHERE is_active ORDER BY created_at",
            PROJECT_COLUMNS
        );
        let rows = conn.query(sql.as_str(), &[]).await?;
        rows.iter().map(project_from_row).collect()
    }

    /// Project by its unique code.
    pub async fn project_get_by_code(&self, code: &str) -> ApiResult<Option<Project>> {
        let conn = self.get_conn().await?;
        let sql = format!(
            "SELECT {} FROM projects WHERE project_code = $1 LIMIT 1",
            PROJECT_COLUMNS
        );
        let row = conn.query_opt(sql.as_str(), &[&code]).await?;
        row.as_ref().map(project_from_row).transpose()
    }

    // ========================================================================
    // SCHEMA MANAGEMENT
    // ========================================================================

    /// Create the tables if they do not exist.
    pub async fn migrate(&self) -> ApiResult<()> {
        let conn = self.get_conn().await?;
        conn.batch_execute(SCHEMA_SQL).await?;
        tracing::info!("Schema applied");
        Ok(())
    }

    /// Drop every folio table.
    pub async fn reset(&self) -> ApiResult<()> {
        let conn = self.get_conn().await?;
        conn.batch_execute(RESET_SQL).await?;
        tracing::info!("All tables dropped");
        Ok(())
    }

    /// Insert a seed document in one transaction: profile, skills, projects.
    ///
    /// Record ids in the document are ignored; the database assigns them.
    pub async fn seed(&self, seed: &SeedData) -> ApiResult<SeedSummary> {
        let mut conn = self.get_conn().await?;
        let tx = conn.transaction().await?;

        let profile = &seed.profile;
        tx.execute(
            "INSERT INTO profiles (first_name, last_name, title, pronouns, motto, location, bio, \
             services, ethos, contact, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
            &[
                &profile.first_name,
                &profile.last_name,
                &profile.title,
                &profile.pronouns,
                &profile.motto,
                &Json(&profile.location),
                &Json(&profile.bio),
                &Json(&profile.services),
                &Json(&profile.ethos),
                &Json(&profile.contact),
                &profile.created_at,
                &profile.updated_at,
            ],
        )
        .await?;

        for skill in &seed.skills {
            if !skill.has_valid_proficiency() {
                return Err(ApiError::invalid_input(format!(
                    "Skill '{}' has proficiency {}, expected {}-{}",
                    skill.name,
                    skill.proficiency,
                    Skill::MIN_PROFICIENCY,
                    Skill::MAX_PROFICIENCY
                )));
            }
            tx.execute(
                "INSERT INTO skills (name, icon, proficiency, category, is_active, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
                &[
                    &skill.name,
                    &skill.icon,
                    &skill.proficiency,
                    &skill.category.as_str(),
                    &i32::from(skill.is_active),
                    &skill.created_at,
                    &skill.updated_at,
                ],
            )
            .await?;
        }

        for project in &seed.projects {
            tx.execute(
                "INSERT INTO projects (project_code, category, title, subtitle, contents, is_active, \
                 display_theme, photos, skills, links, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
                &[
                    &project.project_code,
                    &project.category,
                    &project.title,
                    &project.subtitle,
                    &Json(&project.contents),
                    &project.is_active,
                    &project.display_theme,
                    &Json(&project.photos),
                    &Json(&project.skills),
                    &project.links.as_ref().map(Json),
                    &project.created_at,
                    &project.updated_at,
                ],
            )
            .await?;
        }

        tx.commit().await?;

        let summary = SeedSummary {
            skills: seed.skills.len(),
            projects: seed.projects.len(),
        };
        tracing::info!(
            skills = summary.skills,
            projects = summary.projects,
            "Seed data inserted"
        );
        Ok(summary)
    }
}

// ============================================================================
// ROW MAPPING
// ============================================================================

fn profile_from_row(row: &Row) -> ApiResult<Profile> {
    let Json(location): Json<Location> = row.try_get("location")?;
    let Json(bio): Json<Vec<String>> = row.try_get("bio")?;
    let Json(services): Json<Section<ServiceItem>> = row.try_get("services")?;
    let Json(ethos): Json<Section<EthosItem>> = row.try_get("ethos")?;
    let Json(contact): Json<BTreeMap<String, ContactInfo>> = row.try_get("contact")?;

    Ok(Profile {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        title: row.try_get("title")?,
        pronouns: row.try_get("pronouns")?,
        motto: row.try_get("motto")?,
        location,
        bio,
        services,
        ethos,
        contact,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn skill_from_row(row: &Row) -> ApiResult<Skill> {
    let category: String = row.try_get("category")?;
    let category = category.parse::<SkillCategory>().map_err(|e| {
        tracing::error!(error = %e, "Invalid skill category in database");
        ApiError::database_error("Stored skill has an invalid category")
    })?;
    let is_active: i32 = row.try_get("is_active")?;

    Ok(Skill {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        icon: row.try_get("icon")?,
        proficiency: row.try_get("proficiency")?,
        category,
        is_active: is_active != 0,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn project_from_row(row: &Row) -> ApiResult<Project> {
    let Json(contents): Json<Vec<String>> = row.try_get("contents")?;
    let Json(photos): Json<ProjectPhotos> = row.try_get("photos")?;
    let Json(skills): Json<ProjectSkills> = row.try_get("skills")?;
    let links: Option<Json<Vec<ProjectLink>>> = row.try_get("links")?;

    Ok(Project {
        id: row.try_get("id")?,
        project_code: row.try_get("project_code")?,
        category: row.try_get("category")?,
        title: row.try_get("title")?,
        subtitle: row.try_get("subtitle")?,
        contents,
        is_active: row.try_get("is_active")?,
        display_theme: row.try_get("display_theme")?,
        photos,
        skills,
        links: links.map(|Json(links)| links),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
