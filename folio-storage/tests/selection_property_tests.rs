//! Property-Based Tests for Theme Selection
//!
//! **Property: Selection Integrity**
//!
//! For any sequence of selections, an unknown name never changes state or
//! backends, an unparseable mode always lands on dark, repeating a select
//! is a no-op on observable state, and toggling twice restores the mode.

use std::sync::Arc;

use folio_core::{ThemeMode, ThemeTable};
use folio_storage::{
    AttributeSink, InMemoryStore, KeyValueStore, PersistedSelection, MODE_ATTRIBUTE,
    NAME_ATTRIBUTE, THEME_MODE_KEY, THEME_NAME_KEY,
};
use proptest::prelude::*;

// ============================================================================
// HARNESS
// ============================================================================

struct Harness {
    cookie: Arc<InMemoryStore>,
    local: Arc<InMemoryStore>,
    sink: Arc<AttributeSink>,
    selection: PersistedSelection,
}

impl Harness {
    fn new() -> Self {
        let cookie = Arc::new(InMemoryStore::new("cookie"));
        let local = Arc::new(InMemoryStore::new("local"));
        let sink = Arc::new(AttributeSink::new());
        let backends: Vec<Arc<dyn KeyValueStore>> = vec![cookie.clone(), local.clone()];
        let selection =
            PersistedSelection::initialize(Arc::new(ThemeTable::builtin()), backends, sink.clone());
        Self {
            cookie,
            local,
            sink,
            selection,
        }
    }

    /// Everything an observer can see: state, both tiers, attributes.
    fn observe(&self) -> (String, [Option<String>; 4], [Option<String>; 2]) {
        let read = |store: &InMemoryStore, key: &str| store.get_string(key).expect("in-memory read");
        (
            self.selection.composite_key(),
            [
                read(&self.cookie, THEME_NAME_KEY),
                read(&self.cookie, THEME_MODE_KEY),
                read(&self.local, THEME_NAME_KEY),
                read(&self.local, THEME_MODE_KEY),
            ],
            [
                self.sink.attribute(NAME_ATTRIBUTE),
                self.sink.attribute(MODE_ATTRIBUTE),
            ],
        )
    }
}

// ============================================================================
// STRATEGIES
// ============================================================================

const BUILTIN: [&str; 5] = ["cloud", "galaxy", "forest", "ocean", "sunset"];

fn known_name() -> impl Strategy<Value = String> {
    prop::sample::select(BUILTIN.to_vec()).prop_map(str::to_string)
}

fn unknown_name() -> impl Strategy<Value = String> {
    "[a-zA-Z-]{0,12}".prop_filter("must not be a builtin theme", |s| !BUILTIN.contains(&s.as_str()))
}

fn valid_mode() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("light".to_string())),
        Just(Some("dark".to_string())),
    ]
}

fn invalid_mode() -> impl Strategy<Value = String> {
    ".{0,10}".prop_filter("must not parse as a mode", |s| s != "light" && s != "dark")
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_unknown_name_never_mutates(
        name in known_name(),
        mode in valid_mode(),
        bogus in unknown_name(),
        bogus_mode in valid_mode(),
    ) {
        let mut harness = Harness::new();
        prop_assert!(harness.selection.select(&name, mode.as_deref()));
        let before = harness.observe();

        prop_assert!(!harness.selection.select(&bogus, bogus_mode.as_deref()));
        prop_assert_eq!(harness.observe(), before);
    }

    #[test]
    fn prop_invalid_mode_coerced_to_dark(name in known_name(), mode in invalid_mode()) {
        let mut harness = Harness::new();
        prop_assert!(harness.selection.select(&name, Some(&mode)));
        prop_assert_eq!(harness.selection.current().mode, ThemeMode::Dark);
        prop_assert_eq!(harness.selection.current().name.as_str(), name.as_str());
    }

    #[test]
    fn prop_select_is_idempotent(name in known_name(), mode in valid_mode()) {
        let mut harness = Harness::new();
        prop_assert!(harness.selection.select(&name, mode.as_deref()));
        let once = harness.observe();
        prop_assert!(harness.selection.select(&name, mode.as_deref()));
        prop_assert_eq!(harness.observe(), once);
    }

    #[test]
    fn prop_toggle_twice_restores_mode(name in known_name(), mode in valid_mode()) {
        let mut harness = Harness::new();
        prop_assert!(harness.selection.select(&name, mode.as_deref()));
        let original = harness.selection.current().clone();

        prop_assert!(harness.selection.toggle_mode());
        prop_assert_ne!(harness.selection.current().mode, original.mode);
        prop_assert!(harness.selection.toggle_mode());
        prop_assert_eq!(harness.selection.current(), &original);
    }

    #[test]
    fn prop_last_select_wins(picks in prop::collection::vec((known_name(), valid_mode()), 1..8)) {
        let mut harness = Harness::new();
        for (name, mode) in &picks {
            prop_assert!(harness.selection.select(name, mode.as_deref()));
        }
        let (last_name, _) = picks.last().expect("at least one pick");

        // A fresh selection over the same tiers restores the last pick.
        let backends: Vec<Arc<dyn KeyValueStore>> = vec![harness.cookie.clone(), harness.local.clone()];
        let restored = PersistedSelection::initialize(
            Arc::new(ThemeTable::builtin()),
            backends,
            Arc::new(AttributeSink::new()),
        );
        prop_assert_eq!(restored.current(), harness.selection.current());
        prop_assert_eq!(restored.current().name.as_str(), last_name.as_str());
    }
}
