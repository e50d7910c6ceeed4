//! Property-Based Tests for the Single-Flight Cache
//!
//! **Property: At Most One Fetch In Flight**
//!
//! For any number of concurrent callers, with or without force, exactly one
//! fetch runs and every caller observes its outcome.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use folio_core::FetchError;
use folio_storage::{CacheStatus, FetchResult, SingleFlightCache, ValueFetcher};
use futures_util::future::join_all;
use proptest::prelude::*;
use tokio::sync::Semaphore;

struct GatedFetcher {
    calls: AtomicUsize,
    gate: Semaphore,
    outcome: FetchResult<u64>,
}

#[async_trait]
impl ValueFetcher<u64> for GatedFetcher {
    async fn fetch(&self) -> FetchResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.acquire().await.expect("gate never closes").forget();
        self.outcome.clone()
    }
}

fn outcome_strategy() -> impl Strategy<Value = FetchResult<u64>> {
    prop_oneof![
        any::<u64>().prop_map(Ok),
        Just(Err(FetchError::Timeout)),
        (400u16..600).prop_map(|status| Err(FetchError::Status {
            status,
            message: "upstream".to_string(),
        })),
    ]
}

proptest! {
    #[test]
    fn prop_concurrent_callers_share_one_fetch(
        forces in prop::collection::vec(any::<bool>(), 1..16),
        outcome in outcome_strategy(),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");

        let fetcher = Arc::new(GatedFetcher {
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(0),
            outcome: outcome.clone(),
        });
        let cache: SingleFlightCache<u64> = SingleFlightCache::new(fetcher.clone());

        let results = runtime.block_on(async {
            let callers = join_all(forces.iter().map(|force| cache.get(*force)));
            let opener = async {
                tokio::task::yield_now().await;
                fetcher.gate.add_permits(1);
            };
            let (results, ()) = tokio::join!(callers, opener);
            results
        });

        prop_assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        for result in &results {
            prop_assert_eq!(result, &outcome);
        }
        let expected = if outcome.is_ok() { CacheStatus::Ready } else { CacheStatus::Failed };
        prop_assert_eq!(cache.status(), expected);
    }
}
