//! Client-side caching of remotely fetched values.
//!
//! The cache holds exactly one value and guarantees that concurrent readers
//! trigger at most one fetch. Staleness is explicit: a failed refresh keeps
//! the last good value visible through [`CachedValue`] alongside the error.
//!
//! # Example
//!
//! ```ignore
//! let cache = SingleFlightCache::new(fetcher);
//!
//! let profile = cache.get(false).await?;
//! if cache.peek().has_error() {
//!     tracing::warn!("Serving a stale profile");
//! }
//! ```

pub mod single_flight;

pub use single_flight::{CacheStatus, CachedValue, FetchResult, SingleFlightCache, ValueFetcher};
