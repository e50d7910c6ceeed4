//! Process-wide profile cache.
//!
//! Every accessor except [`ProfileStore::profile`] and
//! [`ProfileStore::refresh`] reads the cached snapshot and never triggers a
//! request.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use folio_core::{ContactInfo, EthosItem, FetchError, Location, Profile, Section, ServiceItem};
use folio_storage::{CachedValue, FetchResult, SingleFlightCache, ValueFetcher};

use crate::api_client::RestClient;

/// Fetches `GET /api/profile`.
#[derive(Debug, Clone)]
pub struct ProfileFetcher {
    client: RestClient,
}

impl ProfileFetcher {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ValueFetcher<Profile> for ProfileFetcher {
    async fn fetch(&self) -> FetchResult<Profile> {
        self.client.fetch_profile().await.map_err(FetchError::from)
    }
}

#[derive(Debug, Clone)]
pub struct ProfileStore {
    cache: SingleFlightCache<Profile>,
}

impl ProfileStore {
    pub fn new(client: RestClient) -> Self {
        Self::with_fetcher(Arc::new(ProfileFetcher::new(client)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn ValueFetcher<Profile>>) -> Self {
        Self {
            cache: SingleFlightCache::new(fetcher),
        }
    }

    /// Cached profile, fetched on first use or when `force` is set.
    pub async fn profile(&self, force: bool) -> FetchResult<Profile> {
        self.cache.get(force).await
    }

    pub async fn refresh(&self) -> FetchResult<Profile> {
        self.cache.get(true).await
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn snapshot(&self) -> CachedValue<Profile> {
        self.cache.peek()
    }

    pub fn has_profile(&self) -> bool {
        self.snapshot().has_value()
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot().is_loading()
    }

    pub fn last_error(&self) -> Option<FetchError> {
        self.snapshot().error
    }

    /// "First Last", or empty without a profile.
    pub fn full_name(&self) -> String {
        self.with_profile(Profile::full_name).unwrap_or_default()
    }

    pub fn first_name(&self) -> String {
        self.with_profile(|p| p.first_name.clone())
            .unwrap_or_default()
    }

    pub fn last_name(&self) -> String {
        self.with_profile(|p| p.last_name.clone()).unwrap_or_default()
    }

    pub fn location(&self) -> Option<Location> {
        self.with_profile(|p| p.location.clone())
    }

    pub fn motto(&self) -> String {
        self.with_profile(|p| p.motto.clone()).unwrap_or_default()
    }

    pub fn bio(&self) -> Vec<String> {
        self.with_profile(|p| p.bio.clone()).unwrap_or_default()
    }

    pub fn services(&self) -> Option<Section<ServiceItem>> {
        self.with_profile(|p| p.services.clone())
    }

    pub fn ethos(&self) -> Option<Section<EthosItem>> {
        self.with_profile(|p| p.ethos.clone())
    }

    pub fn contact(&self) -> BTreeMap<String, ContactInfo> {
        self.with_profile(|p| p.contact.clone()).unwrap_or_default()
    }

    fn with_profile<R>(&self, f: impl FnOnce(&Profile) -> R) -> Option<R> {
        self.snapshot().value.as_ref().map(f)
    }
}
