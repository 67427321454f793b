// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Deduplicated, revalidating query cache
//!
//! One [`QueryCache`] instance is created per application and handed to
//! consumers explicitly; it is never a module-level global. Per key the
//! cache guarantees at most one in-flight fetch: the first caller starts
//! it and later callers await the same shared future. Completed values
//! carry a fetch timestamp; a read inside the staleness window returns the
//! cached value without touching the network, a read outside it starts a
//! refresh while [`QueryCache::snapshot`] keeps reporting the stale value
//! with `is_fetching` raised (stale-while-revalidate).
//!
//! Responses always land in the slot of the key that requested them. A
//! slow response for an abandoned filter combination therefore populates
//! an entry nobody is reading anymore instead of overwriting fresher data.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use std::future::Future;
use tokio::time::Instant;

use crate::error::QueryError;
use crate::key::QueryKey;
use crate::state::QueryState;

/// Default staleness window for dashboard queries.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(60);

type Erased = Arc<dyn Any + Send + Sync>;
type FlightOutcome = Result<Erased, Arc<QueryError>>;
type Flight = Shared<BoxFuture<'static, FlightOutcome>>;

struct StoredValue {
    erased: Erased,
    fetched_at: Instant,
}

#[derive(Default)]
struct Slot {
    value: Option<StoredValue>,
    error: Option<Arc<QueryError>>,
    in_flight: Option<Flight>,
}

struct CacheInner {
    stale_after: Duration,
    slots: Mutex<HashMap<QueryKey, Slot>>,
}

/// Process-wide query cache, cloned cheaply into every consumer.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<CacheInner>,
}

impl QueryCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                stale_after,
                slots: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn with_default_staleness() -> Self {
        Self::new(DEFAULT_STALE_AFTER)
    }

    /// Read-only view of one slot, for rendering. Never triggers a fetch.
    pub fn snapshot<T: Send + Sync + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        let slots = lock(&self.inner.slots);
        match slots.get(key) {
            Some(slot) => QueryState {
                data: slot
                    .value
                    .as_ref()
                    .and_then(|stored| stored.erased.clone().downcast::<T>().ok()),
                error: slot.error.clone(),
                is_fetching: slot.in_flight.is_some(),
            },
            None => QueryState::default(),
        }
    }

    /// Drop a slot's value and error so the next read refetches. An
    /// in-flight fetch is left to land normally.
    pub fn invalidate(&self, key: &QueryKey) {
        let mut slots = lock(&self.inner.slots);
        if let Some(slot) = slots.get_mut(key) {
            slot.value = None;
            slot.error = None;
        }
    }

    /// Drop every slot.
    pub fn clear(&self) {
        lock(&self.inner.slots).clear();
    }

    /// Read through the cache with the cache-wide staleness window.
    pub async fn fetch<T, F, Fut>(&self, key: &QueryKey, make: F) -> Result<Arc<T>, Arc<QueryError>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, QueryError>> + Send + 'static,
    {
        self.fetch_with(key, self.inner.stale_after, make).await
    }

    /// Read through the cache. Returns the cached value when it is younger
    /// than `stale_after`; otherwise joins the in-flight fetch for this key
    /// or starts one with `make`. The returned future settles with the
    /// fetched value, shared verbatim by every concurrent caller.
    pub async fn fetch_with<T, F, Fut>(
        &self,
        key: &QueryKey,
        stale_after: Duration,
        make: F,
    ) -> Result<Arc<T>, Arc<QueryError>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, QueryError>> + Send + 'static,
    {
        let flight = {
            let mut slots = lock(&self.inner.slots);
            let slot = slots.entry(key.clone()).or_default();

            if let Some(stored) = &slot.value {
                if stored.fetched_at.elapsed() < stale_after {
                    tracing::trace!(key = %key, "cache hit");
                    return downcast(stored.erased.clone());
                }
            }

            match &slot.in_flight {
                Some(flight) => {
                    tracing::trace!(key = %key, "joining in-flight fetch");
                    flight.clone()
                }
                None => {
                    tracing::debug!(key = %key, "starting fetch");
                    let fut = make();
                    let inner = Arc::clone(&self.inner);
                    let owned_key = key.clone();
                    let flight: Flight = async move {
                        let outcome = fut.await.map(|value| Arc::new(value) as Erased);
                        settle(&inner, &owned_key, outcome)
                    }
                    .boxed()
                    .shared();
                    slot.in_flight = Some(flight.clone());
                    flight
                }
            }
        };

        downcast(flight.await?)
    }
}

/// Record a settled fetch in its slot. Cancellations clear the in-flight
/// marker and nothing else: no error is recorded, no data is dropped.
fn settle(inner: &CacheInner, key: &QueryKey, outcome: Result<Erased, QueryError>) -> FlightOutcome {
    let mut slots = lock(&inner.slots);
    let slot = slots.entry(key.clone()).or_default();
    slot.in_flight = None;

    match outcome {
        Ok(erased) => {
            slot.value = Some(StoredValue {
                erased: erased.clone(),
                fetched_at: Instant::now(),
            });
            slot.error = None;
            Ok(erased)
        }
        Err(err) if err.is_cancelled() => {
            tracing::trace!(key = %key, "fetch cancelled");
            Err(Arc::new(err))
        }
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "fetch failed");
            let err = Arc::new(err);
            slot.error = Some(err.clone());
            Err(err)
        }
    }
}

fn downcast<T: Send + Sync + 'static>(erased: Erased) -> Result<Arc<T>, Arc<QueryError>> {
    erased.downcast::<T>().map_err(|_| {
        Arc::new(QueryError::Internal(
            "cache slot holds a different type for this key".to_string(),
        ))
    })
}

fn lock<'a, T>(mutex: &'a Mutex<T>) -> MutexGuard<'a, T> {
    // Slot bookkeeping cannot leave the map inconsistent, so a poisoned
    // lock is still usable.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{advance, sleep};

    fn key(cursor: Option<&str>) -> QueryKey {
        QueryKey::new("numbers").text("cursor", cursor)
    }

    fn counting_fetch(
        calls: &Arc<AtomicUsize>,
        value: u64,
    ) -> impl Future<Output = Result<u64, QueryError>> + Send + 'static {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            sleep(Duration::from_millis(10)).await;
            Ok(value)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_fetches_share_one_flight() {
        let cache = QueryCache::with_default_staleness();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = key(None);

        let (a, b) = tokio::join!(
            cache.fetch(&key, || counting_fetch(&calls, 7)),
            cache.fetch(&key, || counting_fetch(&calls, 7)),
        );

        assert_eq!(*a.unwrap(), 7);
        assert_eq!(*b.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_values_are_served_without_refetching() {
        let cache = QueryCache::with_default_staleness();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = key(None);

        cache.fetch(&key, || counting_fetch(&calls, 7)).await.unwrap();
        let again = cache.fetch(&key, || counting_fetch(&calls, 8)).await.unwrap();

        assert_eq!(*again, 7, "within the window the cached value wins");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_value_stays_visible_during_revalidation() {
        let cache = QueryCache::with_default_staleness();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = key(None);

        cache.fetch(&key, || counting_fetch(&calls, 1)).await.unwrap();
        advance(DEFAULT_STALE_AFTER + Duration::from_secs(1)).await;

        let refresh = tokio::spawn({
            let cache = cache.clone();
            let calls = calls.clone();
            let key = key.clone();
            async move { cache.fetch(&key, || counting_fetch(&calls, 2)).await }
        });
        tokio::task::yield_now().await;

        let during: QueryState<u64> = cache.snapshot(&key);
        assert_eq!(during.data.as_deref(), Some(&1), "stale data stays visible");
        assert!(during.is_fetching);

        let refreshed = refresh.await.unwrap().unwrap();
        assert_eq!(*refreshed, 2);
        let after: QueryState<u64> = cache.snapshot(&key);
        assert_eq!(after.data.as_deref(), Some(&2));
        assert!(!after.is_fetching);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_records_error_and_keeps_stale_value() {
        let cache = QueryCache::with_default_staleness();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = key(None);

        cache.fetch(&key, || counting_fetch(&calls, 1)).await.unwrap();
        advance(DEFAULT_STALE_AFTER + Duration::from_secs(1)).await;

        let failed = cache
            .fetch::<u64, _, _>(&key, || async {
                Err(QueryError::Internal("backend down".to_string()))
            })
            .await;
        assert!(failed.is_err());

        let state: QueryState<u64> = cache.snapshot(&key);
        assert_eq!(state.data.as_deref(), Some(&1));
        assert!(state.error.is_some());

        // Retry path: the next read re-issues the request and clears the
        // recorded error on success.
        let retried = cache.fetch(&key, || counting_fetch(&calls, 3)).await.unwrap();
        assert_eq!(*retried, 3);
        let state: QueryState<u64> = cache.snapshot(&key);
        assert!(state.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_fetch_leaves_the_slot_untouched() {
        let cache = QueryCache::with_default_staleness();
        let key = key(None);

        let outcome = cache
            .fetch::<u64, _, _>(&key, || async { Err(QueryError::Cancelled) })
            .await;
        assert!(matches!(outcome, Err(err) if err.is_cancelled()));

        let state: QueryState<u64> = cache.snapshot(&key);
        assert!(state.data.is_none());
        assert!(state.error.is_none(), "cancellation is not an error");
        assert!(!state.is_fetching);
        assert!(state.is_loading(), "slot reads as never-fetched");
    }

    #[tokio::test(start_paused = true)]
    async fn distinct_keys_have_distinct_slots() {
        let cache = QueryCache::with_default_staleness();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = cache
            .fetch(&key(None), || counting_fetch(&calls, 1))
            .await
            .unwrap();
        let second = cache
            .fetch(&key(Some("c2")), || counting_fetch(&calls, 2))
            .await
            .unwrap();

        assert_eq!((*first, *second), (1, 2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidation_forces_a_refetch() {
        let cache = QueryCache::with_default_staleness();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = key(None);

        cache.fetch(&key, || counting_fetch(&calls, 1)).await.unwrap();
        cache.invalidate(&key);
        let refreshed = cache.fetch(&key, || counting_fetch(&calls, 2)).await.unwrap();

        assert_eq!(*refreshed, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
