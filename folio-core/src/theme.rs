//! Theme table and selection types.
//!
//! A theme is a named pair of token maps (one per [`ThemeMode`]) plus an
//! icon. The table is read-only configuration: the core only validates names
//! against it and hands token maps through. It never interprets the tokens.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::text::uppercase_first;

/// Theme used when nothing valid has been persisted.
pub const DEFAULT_THEME_NAME: &str = "cloud";

/// Mode used when nothing valid has been persisted or requested.
pub const DEFAULT_THEME_MODE: ThemeMode = ThemeMode::Dark;

/// Separator between name and mode in a composite key (`cloud--dark`).
pub const COMPOSITE_SEPARATOR: &str = "--";

/// Design-token name to value (colors, mostly).
pub type TokenMap = BTreeMap<String, String>;

// ============================================================================
// MODE
// ============================================================================

/// Light or dark variant of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(ThemeError::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// The active (name, mode) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ThemeSelection {
    pub name: String,
    pub mode: ThemeMode,
}

impl ThemeSelection {
    pub fn new(name: impl Into<String>, mode: ThemeMode) -> Self {
        Self {
            name: name.into(),
            mode,
        }
    }

    /// Lookup key into the token table, e.g. `galaxy--light`.
    pub fn composite_key(&self) -> String {
        format!("{}{}{}", self.name, COMPOSITE_SEPARATOR, self.mode)
    }
}

impl Default for ThemeSelection {
    fn default() -> Self {
        Self::new(DEFAULT_THEME_NAME, DEFAULT_THEME_MODE)
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// One theme: an icon and up to two token maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeEntry {
    pub name: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<TokenMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<TokenMap>,
}

impl ThemeEntry {
    /// Token map for `mode`, if this theme defines that variant.
    pub fn variant(&self, mode: ThemeMode) -> Option<&TokenMap> {
        match mode {
            ThemeMode::Light => self.light.as_ref(),
            ThemeMode::Dark => self.dark.as_ref(),
        }
    }

    pub fn metadata(&self) -> ThemeMetadata {
        ThemeMetadata {
            name: self.name.clone(),
            icon: self.icon.clone(),
            display_name: uppercase_first(&self.name),
            has_light_variant: self.light.is_some(),
            has_dark_variant: self.dark.is_some(),
        }
    }
}

/// Descriptive data for theme pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ThemeMetadata {
    pub name: String,
    pub icon: String,
    pub display_name: String,
    pub has_light_variant: bool,
    pub has_dark_variant: bool,
}

/// Ordered, name-unique collection of themes.
///
/// Declaration order is preserved and is the order pickers list themes in.
/// Deserializes from a `themes = [...]` document (TOML `[[themes]]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ThemeTableDocument", into = "ThemeTableDocument")]
pub struct ThemeTable {
    entries: Vec<ThemeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThemeTableDocument {
    themes: Vec<ThemeEntry>,
}

impl TryFrom<ThemeTableDocument> for ThemeTable {
    type Error = ThemeError;

    fn try_from(doc: ThemeTableDocument) -> Result<Self, Self::Error> {
        ThemeTable::from_entries(doc.themes)
    }
}

impl From<ThemeTable> for ThemeTableDocument {
    fn from(table: ThemeTable) -> Self {
        Self {
            themes: table.entries,
        }
    }
}

impl ThemeTable {
    /// Build a table, rejecting empty and duplicate names.
    pub fn from_entries(entries: Vec<ThemeEntry>) -> Result<Self, ThemeError> {
        for (idx, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(ThemeError::EmptyName);
            }
            if entries[..idx].iter().any(|e| e.name == entry.name) {
                return Err(ThemeError::DuplicateName {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// The themes shipped with the site.
    pub fn builtin() -> Self {
        let entries = vec![
            builtin_entry("cloud", "mdi-weather-cloudy", ["#f5f7fa", "#3f6fb5"], ["#14181f", "#8fb3e8"]),
            builtin_entry("galaxy", "mdi-star-shooting", ["#f3f0fb", "#6a3fb5"], ["#0d0a1a", "#b79cf2"]),
            builtin_entry("forest", "mdi-pine-tree", ["#f2f7f2", "#2f7a43"], ["#0f1a12", "#7fcf94"]),
            builtin_entry("ocean", "mdi-waves", ["#eff8fb", "#1f7a99"], ["#0a171c", "#72c7e0"]),
            builtin_entry("sunset", "mdi-weather-sunset", ["#fdf4ee", "#c2562b"], ["#1c100a", "#f2a071"]),
        ];
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    pub fn entry(&self, name: &str) -> Option<&ThemeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeEntry> {
        self.entries.iter()
    }

    /// Theme names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn metadata(&self, name: &str) -> Option<ThemeMetadata> {
        self.entry(name).map(ThemeEntry::metadata)
    }

    pub fn tokens(&self, name: &str, mode: ThemeMode) -> Option<&TokenMap> {
        self.entry(name).and_then(|e| e.variant(mode))
    }

    /// Resolve a composite key such as `ocean--light`.
    ///
    /// Returns `None` for bare names, unknown names, unknown modes, and
    /// variants the theme does not define.
    pub fn tokens_for_key(&self, key: &str) -> Option<&TokenMap> {
        let (name, mode) = key.rsplit_once(COMPOSITE_SEPARATOR)?;
        let mode = mode.parse::<ThemeMode>().ok()?;
        self.tokens(name, mode)
    }
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_entry(name: &str, icon: &str, light: [&str; 2], dark: [&str; 2]) -> ThemeEntry {
    let tokens = |[background, primary]: [&str; 2]| {
        let mut map = TokenMap::new();
        map.insert("background".to_string(), background.to_string());
        map.insert("primary".to_string(), primary.to_string());
        map
    };
    ThemeEntry {
        name: name.to_string(),
        icon: icon.to_string(),
        light: Some(tokens(light)),
        dark: Some(tokens(dark)),
    }
}
