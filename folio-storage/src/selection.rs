//! The user's theme selection, persisted across several storage tiers.
//!
//! Backends are consulted in priority order on startup (cookies before the
//! durable local store). Every successful `select` writes all tiers and
//! pushes the result to a [`PresentationSink`] so the rendering layer can
//! paint the right theme before its first frame.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use folio_core::{
    ThemeMetadata, ThemeMode, ThemeSelection, ThemeTable, TokenMap, DEFAULT_THEME_MODE,
    DEFAULT_THEME_NAME,
};

use crate::kv::KeyValueStore;

/// Backend key holding the theme name.
pub const THEME_NAME_KEY: &str = "theme-name";

/// Backend key holding the theme mode.
pub const THEME_MODE_KEY: &str = "theme-mode";

/// Attribute carrying the mode (`light`/`dark`).
pub const MODE_ATTRIBUTE: &str = "data-theme";

/// Attribute carrying the theme name.
pub const NAME_ATTRIBUTE: &str = "data-theme-name";

// ============================================================================
// PRESENTATION SINKS
// ============================================================================

/// Receives the selection whenever it is established or changed.
pub trait PresentationSink: Send + Sync {
    fn apply(&self, selection: &ThemeSelection);
}

/// Records document attributes for the rendering layer to read.
#[derive(Debug, Default)]
pub struct AttributeSink {
    attributes: RwLock<BTreeMap<String, String>>,
}

impl AttributeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Snapshot of every recorded attribute.
    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PresentationSink for AttributeSink {
    fn apply(&self, selection: &ThemeSelection) {
        let mut attributes = self
            .attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        attributes.insert(MODE_ATTRIBUTE.to_string(), selection.mode.to_string());
        attributes.insert(NAME_ATTRIBUTE.to_string(), selection.name.clone());
    }
}

/// Sink for contexts with nothing to paint.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl PresentationSink for NoopSink {
    fn apply(&self, _selection: &ThemeSelection) {}
}

// ============================================================================
// PERSISTED SELECTION
// ============================================================================

/// The active theme plus the tiers it is persisted to.
pub struct PersistedSelection {
    table: Arc<ThemeTable>,
    backends: Vec<Arc<dyn KeyValueStore>>,
    sink: Arc<dyn PresentationSink>,
    current: ThemeSelection,
}

impl PersistedSelection {
    /// Restore the selection from `backends` (highest priority first).
    ///
    /// A stored name is used only if `table` knows it; a stored mode only if
    /// it parses. Unreadable backends are skipped. Nothing is written back;
    /// the sink is applied once with the result.
    pub fn initialize(
        table: Arc<ThemeTable>,
        backends: Vec<Arc<dyn KeyValueStore>>,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        let name = first_stored(&backends, THEME_NAME_KEY, |value| {
            table.contains(value).then(|| value.to_string())
        })
        .unwrap_or_else(|| fallback_name(&table));

        let mode = first_stored(&backends, THEME_MODE_KEY, |value| {
            value.parse::<ThemeMode>().ok()
        })
        .unwrap_or(DEFAULT_THEME_MODE);

        let current = ThemeSelection::new(name, mode);
        tracing::debug!(
            name = %current.name,
            mode = %current.mode,
            backends = backends.len(),
            "Theme selection initialized"
        );
        sink.apply(&current);

        Self {
            table,
            backends,
            sink,
            current,
        }
    }

    /// Switch to `name` in `mode`.
    ///
    /// Returns `false` and changes nothing when `name` is not in the table.
    /// A missing mode means dark; an unparseable one is coerced to dark
    /// with a warning.
    pub fn select(&mut self, name: &str, mode: Option<&str>) -> bool {
        if !self.table.contains(name) {
            tracing::warn!(name, "Invalid theme name, selection not changed");
            return false;
        }

        let mode = match mode {
            None => DEFAULT_THEME_MODE,
            Some(raw) => raw.parse::<ThemeMode>().unwrap_or_else(|_| {
                tracing::warn!(mode = raw, "Invalid theme mode, defaulting to dark");
                DEFAULT_THEME_MODE
            }),
        };

        self.current = ThemeSelection::new(name, mode);
        self.persist();
        self.sink.apply(&self.current);
        tracing::debug!(key = %self.current.composite_key(), "Theme selected");
        true
    }

    /// Flip light/dark for the current theme.
    pub fn toggle_mode(&mut self) -> bool {
        let name = self.current.name.clone();
        let mode = self.current.mode.toggled();
        self.select(&name, Some(mode.as_str()))
    }

    pub fn current(&self) -> &ThemeSelection {
        &self.current
    }

    pub fn composite_key(&self) -> String {
        self.current.composite_key()
    }

    /// Tokens of the active variant, if the theme defines it.
    pub fn tokens(&self) -> Option<&TokenMap> {
        self.table.tokens_for_key(&self.current.composite_key())
    }

    /// Theme names in table order.
    pub fn list_available_names(&self) -> Vec<String> {
        self.table.names()
    }

    pub fn metadata_for(&self, name: &str) -> Option<ThemeMetadata> {
        self.table.metadata(name)
    }

    pub fn table(&self) -> &ThemeTable {
        &self.table
    }

    fn persist(&self) {
        let entries = [
            (THEME_NAME_KEY, self.current.name.as_str()),
            (THEME_MODE_KEY, self.current.mode.as_str()),
        ];
        for backend in &self.backends {
            if let Err(err) = backend.set_entries(&entries) {
                tracing::warn!(
                    backend = backend.label(),
                    error = %err,
                    "Failed to persist theme selection"
                );
            }
        }
    }
}

impl std::fmt::Debug for PersistedSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedSelection")
            .field("current", &self.current)
            .field(
                "backends",
                &self.backends.iter().map(|b| b.label()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// First value under `key` that `accept` takes, scanning backends in order.
fn first_stored<T>(
    backends: &[Arc<dyn KeyValueStore>],
    key: &str,
    accept: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    for backend in backends {
        match backend.get_string(key) {
            Ok(Some(value)) => match accept(&value) {
                Some(accepted) => return Some(accepted),
                None => tracing::debug!(
                    backend = backend.label(),
                    key,
                    value = %value,
                    "Ignoring unusable stored value"
                ),
            },
            Ok(None) => {}
            Err(err) => tracing::warn!(
                backend = backend.label(),
                key,
                error = %err,
                "Skipping unavailable store"
            ),
        }
    }
    None
}

// A custom table may not ship the default theme.
fn fallback_name(table: &ThemeTable) -> String {
    if table.contains(DEFAULT_THEME_NAME) {
        return DEFAULT_THEME_NAME.to_string();
    }
    table
        .iter()
        .next()
        .map(|entry| entry.name.clone())
        .unwrap_or_else(|| DEFAULT_THEME_NAME.to_string())
}
