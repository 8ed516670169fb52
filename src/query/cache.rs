//! Query Cache
//!
//! Key-based cache for backend reads with in-flight deduplication.
//!
//! The cache is single-threaded: it lives behind `Rc<RefCell<_>>`, and no
//! borrow is ever held across an `.await`. Every request for a key runs
//! inside one shared future; callers that arrive while it is pending await
//! the same future instead of issuing another request.

use chrono::Utc;
use futures_util::future::{FutureExt, LocalBoxFuture, Shared};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::{Rc, Weak};

use crate::api::{ApiError, ApiResult};

use super::state::{QueryKey, QuerySnapshot, QueryStatus};

type InFlight = Shared<LocalBoxFuture<'static, ()>>;

type Listener = Rc<dyn Fn(&QueryKey)>;

/// Handle returned by [`QueryClient::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct CacheEntry {
    status: QueryStatus,
    data: Option<Rc<dyn Any>>,
    error: Option<ApiError>,
    updated_at: Option<chrono::DateTime<Utc>>,
    /// Next `fetch_query` must go to the network
    stale: bool,
    /// Bumped per request; only the latest request may settle the entry
    generation: u64,
    in_flight: Option<InFlight>,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<QueryKey, CacheEntry>,
    listeners: Vec<(SubscriptionId, QueryKey, Listener)>,
    next_subscription: u64,
}

enum Plan {
    Cached,
    Join(InFlight),
    Start,
}

/// Owned, injectable query cache
///
/// Cloning is cheap and every clone shares the same entries.
#[derive(Clone, Default)]
pub struct QueryClient {
    inner: Rc<RefCell<CacheInner>>,
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("QueryClient")
            .field("entries", &inner.entries.len())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a query, going to the network only when needed
    ///
    /// A fresh successful entry is returned as-is. A pending request for the
    /// key is joined. Otherwise `fetcher` is called once to start a request.
    pub async fn fetch_query<T, F, Fut>(&self, key: impl Into<QueryKey>, fetcher: F) -> QuerySnapshot<T>
    where
        T: Clone + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        let key = key.into();

        let plan = {
            let inner = self.inner.borrow();
            match inner.entries.get(&key) {
                Some(entry) => match &entry.in_flight {
                    Some(in_flight) => Plan::Join(in_flight.clone()),
                    None if entry.status == QueryStatus::Success && !entry.stale => Plan::Cached,
                    None => Plan::Start,
                },
                None => Plan::Start,
            }
        };

        match plan {
            Plan::Cached => {
                tracing::trace!(key = %key, "Query served from cache");
            }
            Plan::Join(in_flight) => {
                tracing::trace!(key = %key, "Joining in-flight query");
                in_flight.await;
            }
            Plan::Start => {
                self.start(key.clone(), fetcher()).await;
            }
        }

        self.snapshot(&key)
    }

    /// Start a new request for `key` even if one is cached or in flight
    ///
    /// Results of requests started earlier are discarded when they land.
    pub async fn refetch<T, F, Fut>(&self, key: impl Into<QueryKey>, fetcher: F) -> QuerySnapshot<T>
    where
        T: Clone + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        let key = key.into();
        self.start(key.clone(), fetcher()).await;
        self.snapshot(&key)
    }

    /// Mark a key so its next `fetch_query` refetches; cached data stays readable
    pub fn invalidate(&self, key: impl Into<QueryKey>) {
        let key = key.into();
        let changed = {
            let mut inner = self.inner.borrow_mut();
            match inner.entries.get_mut(&key) {
                Some(entry) if !entry.stale => {
                    entry.stale = true;
                    true
                }
                _ => false,
            }
        };
        if changed {
            tracing::debug!(key = %key, "Query invalidated");
            self.notify(&key);
        }
    }

    /// Current state of a key; `Idle` if it was never requested
    ///
    /// Data stored under the key with a different type reads as `None`.
    pub fn snapshot<T: Clone + 'static>(&self, key: impl Into<QueryKey>) -> QuerySnapshot<T> {
        let key = key.into();
        let inner = self.inner.borrow();
        match inner.entries.get(&key) {
            Some(entry) => QuerySnapshot {
                status: entry.status,
                data: entry
                    .data
                    .as_ref()
                    .and_then(|data| data.downcast_ref::<T>())
                    .cloned(),
                error: entry.error.clone(),
                updated_at: entry.updated_at,
                is_fetching: entry.in_flight.is_some(),
            },
            None => QuerySnapshot::default(),
        }
    }

    pub fn status(&self, key: impl Into<QueryKey>) -> QueryStatus {
        let key = key.into();
        self.inner
            .borrow()
            .entries
            .get(&key)
            .map(|entry| entry.status)
            .unwrap_or_default()
    }

    pub fn is_fetching(&self, key: impl Into<QueryKey>) -> bool {
        let key = key.into();
        self.inner
            .borrow()
            .entries
            .get(&key)
            .is_some_and(|entry| entry.in_flight.is_some())
    }

    /// Call `listener` after every state change of `key`
    pub fn subscribe(
        &self,
        key: impl Into<QueryKey>,
        listener: impl Fn(&QueryKey) + 'static,
    ) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        inner.next_subscription += 1;
        let id = SubscriptionId(inner.next_subscription);
        inner.listeners.push((id, key.into(), Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(listener_id, _, _)| *listener_id != id);
    }

    fn start<T, Fut>(&self, key: QueryKey, request: Fut) -> InFlight
    where
        T: 'static,
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        let generation = {
            let mut inner = self.inner.borrow_mut();
            let entry = inner.entries.entry(key.clone()).or_default();
            entry.generation += 1;
            entry.status = QueryStatus::Loading;
            entry.generation
        };

        let weak = Rc::downgrade(&self.inner);
        let settle_key = key.clone();
        let in_flight = async move {
            let result = request.await;
            settle(&weak, &settle_key, generation, result);
        }
        .boxed_local()
        .shared();

        if let Some(entry) = self.inner.borrow_mut().entries.get_mut(&key) {
            entry.in_flight = Some(in_flight.clone());
        }
        tracing::debug!(key = %key, generation, "Query started");
        self.notify(&key);

        in_flight
    }

    fn notify(&self, key: &QueryKey) {
        notify(&self.inner, key);
    }
}

fn settle<T: 'static>(weak: &Weak<RefCell<CacheInner>>, key: &QueryKey, generation: u64, result: ApiResult<T>) {
    // Cache dropped while the request was pending
    let Some(inner) = weak.upgrade() else {
        return;
    };

    {
        let mut guard = inner.borrow_mut();
        let Some(entry) = guard.entries.get_mut(key) else {
            return;
        };
        if entry.generation != generation {
            tracing::debug!(key = %key, generation, "Discarding superseded query result");
            return;
        }

        entry.in_flight = None;
        entry.stale = false;
        match result {
            Ok(data) => {
                entry.status = QueryStatus::Success;
                entry.data = Some(Rc::new(data));
                entry.error = None;
                entry.updated_at = Some(Utc::now());
                tracing::info!(key = %key, "Query succeeded");
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Query failed");
                entry.status = QueryStatus::Error;
                entry.error = Some(err);
            }
        }
    }

    notify(&inner, key);
}

fn notify(inner: &Rc<RefCell<CacheInner>>, key: &QueryKey) {
    let listeners: Vec<Listener> = inner
        .borrow()
        .listeners
        .iter()
        .filter(|(_, listener_key, _)| listener_key == key)
        .map(|(_, _, listener)| Rc::clone(listener))
        .collect();

    for listener in listeners {
        listener(key);
    }
}
