//! Authoritative item collection with load and error status.
//!
//! [`ItemStore`] owns the current item snapshot and the two status signals
//! (loading flag, error message) and publishes each of them on its own
//! `tokio::sync::watch` channel. A receiver yields the current value as soon as it
//! is created and every later value after that.
//!
//! # Publication order
//!
//! All mutations run under one lock that is held across "update state, publish to
//! channels", so transitions never interleave. Within a transition the item
//! snapshot is published before the loading flag clears, so an observer that sees
//! `loading == false` after a successful load always reads the new snapshot.
//! [`ItemStore::state`] reads all three values together under the same lock.
//!
//! # Overlapping loads
//!
//! With [`LoadPolicy::LastWriteWins`] a second `load()` while one is in flight
//! starts a second fetch and whichever resolves last determines the collection.
//! The first resolution also clears the loading flag while the second fetch is
//! still running. [`LoadPolicy::LatestRequestWins`] discards any result that does
//! not belong to the most recent `load()` call.
//!
//! There is no fetch timeout: a fetch that never resolves leaves `loading` set.

use super::fetch::ItemFetcher;
use crate::domain::{Item, ItemId};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// The only user-visible error message.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products.";

/// Immutable item collection shared between the store and its subscribers.
pub type Snapshot = Arc<Vec<Item>>;

/// How the store resolves overlapping loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPolicy {
    /// Every fetch result is applied as it arrives; the last one to resolve wins.
    #[default]
    LastWriteWins,

    /// Only the result of the most recent `load()` call is applied.
    LatestRequestWins,
}

impl std::str::FromStr for LoadPolicy {
    type Err = crate::domain::CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-write-wins" => Ok(Self::LastWriteWins),
            "latest-request-wins" => Ok(Self::LatestRequestWins),
            other => Err(crate::domain::CatalogError::Config(format!(
                "unknown load policy: {other}"
            ))),
        }
    }
}

/// Consistent view of the store at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    pub items: Snapshot,
    pub loading: bool,
    pub error: Option<String>,
    /// When the last successful load was applied.
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            loading: false,
            error: None,
            loaded_at: None,
        }
    }
}

struct Channels {
    items: watch::Sender<Snapshot>,
    loading: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
}

struct Inner {
    state: Mutex<StoreState>,
    channels: Channels,
    fetcher: Arc<dyn ItemFetcher>,
    policy: LoadPolicy,
    latest_request: AtomicU64,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // State is only ever replaced wholesale, so a poisoned guard still holds a
        // coherent value.
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn finish_load(&self, request: u64, outcome: crate::domain::Result<Vec<Item>>) {
        let outcome = outcome.and_then(ensure_unique_ids);
        let mut state = self.lock();
        if self.policy == LoadPolicy::LatestRequestWins
            && self.latest_request.load(Ordering::SeqCst) != request
        {
            tracing::debug!(request, "discarding result of superseded load");
            return;
        }

        match outcome {
            Ok(items) => {
                tracing::debug!(request, item_count = items.len(), "load succeeded");
                let snapshot: Snapshot = Arc::new(items);
                state.items = Arc::clone(&snapshot);
                state.loaded_at = Some(Utc::now());
                state.loading = false;
                self.channels.items.send_replace(snapshot);
                self.channels.loading.send_replace(false);
            }
            Err(e) => {
                tracing::warn!(request, error = %e, "load failed");
                state.error = Some(LOAD_FAILED_MESSAGE.to_string());
                state.loading = false;
                self.channels.error.send_replace(state.error.clone());
                self.channels.loading.send_replace(false);
            }
        }
    }
}

/// Item identifiers are unique within a collection; a fetched collection that
/// repeats one is rejected like any other failed load.
fn ensure_unique_ids(items: Vec<Item>) -> crate::domain::Result<Vec<Item>> {
    let mut seen = HashSet::with_capacity(items.len());
    if let Some(duplicate) = items.iter().find(|item| !seen.insert(item.id)) {
        return Err(crate::domain::CatalogError::Fetch(format!(
            "duplicate item id {} in fetched collection",
            duplicate.id
        )));
    }
    Ok(items)
}

/// Owner of the item collection and its load/error status.
///
/// Cheap to clone; clones share the same state and channels.
///
/// # Example
///
/// ```no_run
/// use catalog_view::store::{ItemStore, LoadPolicy, MockFetcher};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # async fn run() -> catalog_view::Result<()> {
/// let fetcher = MockFetcher::with_sample_catalog(Duration::from_millis(600), 0.1)?;
/// let store = ItemStore::new(Arc::new(fetcher), LoadPolicy::default());
///
/// let mut loading = store.loading();
/// store.load().await.ok();
/// assert!(!*loading.borrow_and_update());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ItemStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("state", &*self.inner.lock())
            .field("policy", &self.inner.policy)
            .finish_non_exhaustive()
    }
}

impl ItemStore {
    /// Creates an empty, idle store.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ItemFetcher>, policy: LoadPolicy) -> Self {
        Self::with_items(fetcher, policy, Vec::new())
    }

    /// Creates an idle store pre-populated with `items`.
    #[must_use]
    pub fn with_items(fetcher: Arc<dyn ItemFetcher>, policy: LoadPolicy, items: Vec<Item>) -> Self {
        let state = StoreState {
            items: Arc::new(items),
            ..StoreState::default()
        };
        let channels = Channels {
            items: watch::Sender::new(Arc::clone(&state.items)),
            loading: watch::Sender::new(false),
            error: watch::Sender::new(None),
        };

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                channels,
                fetcher,
                policy,
                latest_request: AtomicU64::new(0),
            }),
        }
    }

    /// Starts loading the full collection.
    ///
    /// Sets `loading = true` and clears the error before returning, then runs the
    /// fetch on a spawned task. On success the collection is replaced and loading
    /// clears; on failure the error channel receives [`LOAD_FAILED_MESSAGE`],
    /// loading clears and the collection is left as it was.
    ///
    /// The returned handle may be ignored; awaiting it waits for this load to be
    /// applied (or discarded, under [`LoadPolicy::LatestRequestWins`]).
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn load(&self) -> JoinHandle<()> {
        let request = {
            let mut state = self.inner.lock();
            let request = self.inner.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
            state.loading = true;
            state.error = None;
            self.inner.channels.loading.send_replace(true);
            self.inner.channels.error.send_replace(None);
            request
        };
        tracing::debug!(request, "load started");

        let fetch = self.inner.fetcher.fetch_all();
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = fetch.await;
            inner.finish_load(request, outcome);
        })
    }

    /// Marks the item with `id` inactive.
    ///
    /// Every matching item is replaced by a copy with `is_active == false` and the
    /// new collection is published. Returns `false` without publishing anything
    /// when no item has that identifier or when it is already inactive.
    pub fn deactivate(&self, id: ItemId) -> bool {
        let mut state = self.inner.lock();

        if !state.items.iter().any(|item| item.id == id) {
            tracing::debug!(id, "deactivate: no item with this id");
            return false;
        }
        if !state.items.iter().any(|item| item.id == id && item.is_active) {
            tracing::debug!(id, "deactivate: item already inactive");
            return false;
        }

        let updated: Vec<Item> = state
            .items
            .iter()
            .map(|item| {
                if item.id == id && item.is_active {
                    item.deactivated()
                } else {
                    item.clone()
                }
            })
            .collect();
        let snapshot: Snapshot = Arc::new(updated);
        state.items = Arc::clone(&snapshot);
        self.inner.channels.items.send_replace(snapshot);

        tracing::debug!(id, "item deactivated");
        true
    }

    /// Current item snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.inner.lock().items)
    }

    /// Items, loading flag, error and last load time read together.
    #[must_use]
    pub fn state(&self) -> StoreState {
        self.inner.lock().clone()
    }

    /// Subscribes to the item collection.
    #[must_use]
    pub fn items(&self) -> watch::Receiver<Snapshot> {
        self.inner.channels.items.subscribe()
    }

    /// Subscribes to the loading flag.
    #[must_use]
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.inner.channels.loading.subscribe()
    }

    /// Subscribes to the error message.
    #[must_use]
    pub fn error(&self) -> watch::Receiver<Option<String>> {
        self.inner.channels.error.subscribe()
    }

    /// The overlap policy this store was created with.
    #[must_use]
    pub fn policy(&self) -> LoadPolicy {
        self.inner.policy
    }
}
