//! Theme selection for the command-line client.
//!
//! A terminal has no request-scoped tier like cookies, so the selection is
//! backed by one JSON file under `state_path`. When that file cannot be
//! opened the selection falls back to process memory and lasts for the
//! current run only.

use std::path::Path;
use std::sync::Arc;

use folio_core::ThemeTable;
use folio_storage::{
    FileStore, InMemoryStore, KeyValueStore, PersistedSelection, PresentationSink,
};

/// Build the selection over the file at `state_path`.
pub fn open_selection(
    state_path: &Path,
    table: ThemeTable,
    sink: Arc<dyn PresentationSink>,
) -> PersistedSelection {
    let backend: Arc<dyn KeyValueStore> = match FileStore::open(state_path) {
        Ok(store) => Arc::new(store),
        Err(error) => {
            tracing::warn!(
                path = %state_path.display(),
                %error,
                "Theme state file unavailable; selection will not persist"
            );
            Arc::new(InMemoryStore::new("session"))
        }
    };
    PersistedSelection::initialize(Arc::new(table), vec![backend], sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ThemeMode;
    use folio_storage::{AttributeSink, NoopSink, MODE_ATTRIBUTE};

    #[test]
    fn test_selection_persists_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("selection.json");

        let mut first = open_selection(&path, ThemeTable::builtin(), Arc::new(NoopSink));
        assert_eq!(first.composite_key(), "cloud--dark");
        assert!(first.select("forest", Some("light")));

        let second = open_selection(&path, ThemeTable::builtin(), Arc::new(NoopSink));
        assert_eq!(second.composite_key(), "forest--light");
        assert!(format!("{:?}", second).contains("\"file\""));
    }

    #[test]
    fn test_corrupt_state_file_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.json");
        std::fs::write(&path, "{ not json").unwrap();

        let sink = Arc::new(AttributeSink::new());
        let mut selection = open_selection(&path, ThemeTable::builtin(), sink.clone());
        assert_eq!(selection.composite_key(), "cloud--dark");
        assert!(format!("{:?}", selection).contains("\"session\""));

        assert!(selection.toggle_mode());
        assert_eq!(selection.current().mode, ThemeMode::Light);
        assert_eq!(sink.attribute(MODE_ATTRIBUTE).as_deref(), Some("light"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
