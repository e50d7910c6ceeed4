//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use folio_core::ThemeTable;
use folio_storage::CookieOptions;

use crate::db::DbClient;

/// What the theme routes need to rebuild a selection per request.
#[derive(Debug, Clone)]
pub struct ThemeState {
    pub table: Arc<ThemeTable>,
    pub cookie_options: CookieOptions,
}

impl ThemeState {
    pub fn new(table: ThemeTable, cookie_options: CookieOptions) -> Self {
        Self {
            table: Arc::new(table),
            cookie_options,
        }
    }
}

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub db: DbClient,
    pub theme: Arc<ThemeState>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(db: DbClient, theme: ThemeState) -> Self {
        Self {
            db,
            theme: Arc::new(theme),
            start_time: Instant::now(),
        }
    }
}

crate::impl_from_ref!(DbClient, db);
crate::impl_from_ref!(Arc<ThemeState>, theme);
crate::impl_from_ref!(Instant, start_time);
