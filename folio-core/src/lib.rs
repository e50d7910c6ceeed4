//! Folio Core - Entity and Theme Types
//!
//! Pure data structures shared by the API server, the storage layer and the
//! client. Behavior lives elsewhere; this crate only holds records, the theme
//! table, small text helpers and the error taxonomy.

use chrono::{DateTime, Utc};

pub mod entities;
pub mod error;
pub mod text;
pub mod theme;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Database row identifier (`serial` primary key).
pub type RecordId = i32;

pub use entities::{
    ContactInfo, EthosItem, Location, Profile, Project, ProjectLink, ProjectPhotos,
    ProjectSkills, Section, SeedData, ServiceItem, Skill, SkillCategory,
};
pub use error::{FetchError, StorageError, StorageResult, ThemeError};
pub use text::{truncate_words, uppercase_first};
pub use theme::{
    ThemeEntry, ThemeMetadata, ThemeMode, ThemeSelection, ThemeTable, TokenMap,
    DEFAULT_THEME_MODE, DEFAULT_THEME_NAME,
};
