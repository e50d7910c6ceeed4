//! Single-flight cache for one lazily fetched value.
//!
//! At most one fetch is outstanding at any time. Callers arriving while a
//! fetch is in flight attach to the same shared future and observe the same
//! outcome; there is no polling. A failed refresh keeps the previously
//! fetched value readable (stale-on-failure) and records the error.
//!
//! `clear()` does not cancel an in-flight fetch. It bumps a generation
//! counter instead, so a result that lands after the clear still resolves
//! for the callers awaiting it but is not written back into the cache. The
//! superseded fetch still counts as outstanding: a `get()` issued before it
//! settles waits for it and only then starts its own request.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use async_trait::async_trait;
use chrono::Utc;
use folio_core::{FetchError, Timestamp};
use futures_util::future::{BoxFuture, FutureExt, Shared};

/// Result of a single fetch.
pub type FetchResult<T> = Result<T, FetchError>;

/// Source of the cached value (typically one HTTP round trip).
///
/// Implementations perform exactly one attempt per call; the cache never
/// retries on its own.
#[async_trait]
pub trait ValueFetcher<T>: Send + Sync {
    async fn fetch(&self) -> FetchResult<T>;
}

/// Lifecycle of the cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CacheStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Point-in-time view of the cache.
///
/// `status == Ready` iff `value` is present and `error` is absent.
/// `status == Failed` iff `error` is present; `value` then holds the last
/// successful fetch, if there ever was one.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedValue<T> {
    pub value: Option<T>,
    pub status: CacheStatus,
    pub error: Option<FetchError>,
    pub fetched_at: Option<Timestamp>,
}

impl<T> CachedValue<T> {
    pub fn idle() -> Self {
        Self {
            value: None,
            status: CacheStatus::Idle,
            error: None,
            fetched_at: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == CacheStatus::Ready
    }

    pub fn is_loading(&self) -> bool {
        self.status == CacheStatus::Loading
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

impl<T> Default for CachedValue<T> {
    fn default() -> Self {
        Self::idle()
    }
}

type InFlight<T> = Shared<BoxFuture<'static, FetchResult<T>>>;

struct Slot<T> {
    state: CachedValue<T>,
    generation: u64,
    in_flight: Option<InFlight<T>>,
    /// Fetch cut loose by `clear()` that may still be running, tagged with
    /// the generation it was started under.
    superseded: Option<(u64, InFlight<T>)>,
}

/// Cache for one value of type `T` with de-duplicated fetches.
///
/// Cloning yields another handle onto the same cache.
///
/// # Example
///
/// ```ignore
/// let cache = SingleFlightCache::new(Arc::new(ProfileFetcher::new(rest)));
///
/// // Both calls share one request.
/// let (a, b) = tokio::join!(cache.get(false), cache.get(false));
///
/// // Bypass the cached value.
/// let fresh = cache.get(true).await?;
/// ```
pub struct SingleFlightCache<T> {
    fetcher: Arc<dyn ValueFetcher<T>>,
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> SingleFlightCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty (`Idle`) cache fed by `fetcher`.
    pub fn new(fetcher: Arc<dyn ValueFetcher<T>>) -> Self {
        Self {
            fetcher,
            slot: Arc::new(Mutex::new(Slot {
                state: CachedValue::idle(),
                generation: 0,
                in_flight: None,
                superseded: None,
            })),
        }
    }

    /// Get the value, fetching it if needed.
    ///
    /// - `Ready` and not forced: returns the cached value immediately.
    /// - A fetch is in flight: waits for it, even when forced.
    /// - Otherwise starts exactly one new fetch, after any fetch superseded
    ///   by `clear()` has settled.
    pub async fn get(&self, force_refresh: bool) -> FetchResult<T> {
        let pending = {
            let mut slot = lock(&self.slot);
            if !force_refresh && slot.state.status == CacheStatus::Ready {
                if let Some(value) = &slot.state.value {
                    return Ok(value.clone());
                }
            }
            match &slot.in_flight {
                Some(in_flight) => {
                    tracing::debug!("Attaching to in-flight fetch");
                    in_flight.clone()
                }
                None => self.begin_fetch(&mut slot),
            }
        };
        pending.await
    }

    /// Reset to `Idle`, dropping value, error and timestamp.
    pub fn clear(&self) {
        let mut slot = lock(&self.slot);
        if let Some(in_flight) = slot.in_flight.take() {
            // A pending fetch already waits on any older superseded one.
            slot.superseded = Some((slot.generation, in_flight));
        }
        slot.generation = slot.generation.wrapping_add(1);
        slot.state = CachedValue::idle();
    }

    /// Snapshot of the current state. Never triggers a fetch.
    pub fn peek(&self) -> CachedValue<T> {
        lock(&self.slot).state.clone()
    }

    pub fn status(&self) -> CacheStatus {
        lock(&self.slot).state.status
    }

    fn begin_fetch(&self, slot: &mut Slot<T>) -> InFlight<T> {
        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;
        slot.state.status = CacheStatus::Loading;
        slot.state.error = None;
        tracing::debug!(generation, "Starting fetch");

        let prior = slot.superseded.take().map(|(_, prior)| prior);
        let fetcher = Arc::clone(&self.fetcher);
        let owner = Arc::downgrade(&self.slot);
        let in_flight = async move {
            if let Some(prior) = prior {
                tracing::debug!(generation, "Waiting for superseded fetch to settle");
                let _ = prior.await;
            }
            let result = fetcher.fetch().await;
            settle(&owner, generation, &result);
            result
        }
        .boxed()
        .shared();

        slot.in_flight = Some(in_flight.clone());
        in_flight
    }
}

impl<T> Clone for SingleFlightCache<T> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> fmt::Debug for SingleFlightCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = lock(&self.slot);
        f.debug_struct("SingleFlightCache")
            .field("status", &slot.state.status)
            .field("generation", &slot.generation)
            .field("fetched_at", &slot.state.fetched_at)
            .finish()
    }
}

/// Write a completed fetch back, unless the cache moved on since it started.
fn settle<T: Clone>(owner: &Weak<Mutex<Slot<T>>>, generation: u64, result: &FetchResult<T>) {
    let Some(owner) = owner.upgrade() else {
        return;
    };
    let mut slot = lock(&owner);
    if matches!(&slot.superseded, Some((tag, _)) if *tag == generation) {
        slot.superseded = None;
    }
    if slot.generation != generation {
        tracing::debug!(
            generation,
            current = slot.generation,
            "Discarding result of a fetch superseded by clear()"
        );
        return;
    }

    slot.in_flight = None;
    match result {
        Ok(value) => {
            slot.state.value = Some(value.clone());
            slot.state.status = CacheStatus::Ready;
            slot.state.error = None;
            slot.state.fetched_at = Some(Utc::now());
            tracing::debug!(generation, "Fetch completed");
        }
        Err(err) => {
            slot.state.status = CacheStatus::Failed;
            slot.state.error = Some(err.clone());
            tracing::warn!(generation, error = %err, "Fetch failed");
        }
    }
}

// Slot updates are plain field assignments, so a poisoned lock still holds
// a consistent state.
fn lock<S>(mutex: &Mutex<S>) -> MutexGuard<'_, S> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
