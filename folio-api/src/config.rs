//! API Configuration Module
//!
//! CORS and theme-cookie settings. Loaded from environment variables with
//! defaults suited to local development.

use folio_storage::{CookieOptions, SameSite};

/// Default lifetime of the theme cookies: one year.
pub const DEFAULT_THEME_COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

// ============================================================================
// API CONFIGURATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct ApiConfig {
    // ========================================================================
    // CORS Configuration
    // ========================================================================
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Whether to allow credentials in CORS requests.
    pub cors_allow_credentials: bool,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    // ========================================================================
    // Theme Cookies
    // ========================================================================
    /// Attributes of the `theme-name`/`theme-mode` cookies.
    pub theme_cookie: CookieOptions,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            cors_allow_credentials: false,
            cors_max_age_secs: 86400,
            theme_cookie: CookieOptions {
                path: "/".to_string(),
                max_age_secs: Some(DEFAULT_THEME_COOKIE_MAX_AGE_SECS),
                same_site: SameSite::Lax,
                secure: false,
            },
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `FOLIO_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `FOLIO_CORS_ALLOW_CREDENTIALS`: "true" or "false" (default: false)
    /// - `FOLIO_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `FOLIO_THEME_COOKIE_MAX_AGE_SECS`: Cookie lifetime, 0 for session cookies (default: one year)
    /// - `FOLIO_THEME_COOKIE_PATH`: Cookie path (default: "/")
    /// - `FOLIO_THEME_COOKIE_SECURE`: "true" to mark cookies Secure (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = std::env::var("FOLIO_CORS_ORIGINS")
            .ok()
            .map(|s| parse_origins(&s))
            .unwrap_or_default();

        let cors_allow_credentials = std::env::var("FOLIO_CORS_ALLOW_CREDENTIALS")
            .ok()
            .map(|s| s.to_lowercase() == "true")
            .unwrap_or(false);

        let cors_max_age_secs = std::env::var("FOLIO_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cors_max_age_secs);

        let max_age_secs = match std::env::var("FOLIO_THEME_COOKIE_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            Some(0) => None,
            Some(secs) => Some(secs),
            None => defaults.theme_cookie.max_age_secs,
        };

        let path = std::env::var("FOLIO_THEME_COOKIE_PATH")
            .ok()
            .filter(|p| p.starts_with('/'))
            .unwrap_or(defaults.theme_cookie.path);

        let secure = std::env::var("FOLIO_THEME_COOKIE_SECURE")
            .ok()
            .map(|s| s.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            cors_origins,
            cors_allow_credentials,
            cors_max_age_secs,
            theme_cookie: CookieOptions {
                path,
                max_age_secs,
                same_site: SameSite::Lax,
                secure,
            },
        }
    }

    /// Check if running in production mode (strict CORS).
    pub fn is_production(&self) -> bool {
        !self.cors_origins.is_empty()
    }

    /// Check if a given origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.cors_origins.is_empty() {
            return true;
        }
        self.cors_origins.iter().any(|allowed| allowed == origin)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
