//! Folio Storage - Client-side state
//!
//! The single-flight cache that fronts remote fetches, the key-value tiers
//! the theme selection persists to, and the selection itself.

pub mod cache;
pub mod kv;
pub mod selection;

pub use cache::{CacheStatus, CachedValue, FetchResult, SingleFlightCache, ValueFetcher};
pub use kv::{CookieOptions, CookieStore, FileStore, InMemoryStore, KeyValueStore, SameSite};
pub use selection::{
    AttributeSink, NoopSink, PersistedSelection, PresentationSink, MODE_ATTRIBUTE, NAME_ATTRIBUTE,
    THEME_MODE_KEY, THEME_NAME_KEY,
};
