//! The catalog facade consumed by the presentation layer.
//!
//! [`Catalog`] ties together the [`ItemStore`], the three UI parameter sinks and
//! the [`DerivedView`]. It is the whole external surface of the core:
//!
//! - observe the derived sequence ([`Catalog::view`])
//! - observe loading and error status ([`Catalog::loading`], [`Catalog::error`])
//! - begin a load ([`Catalog::load`]) and deactivate an item ([`Catalog::deactivate`])
//! - set search text, category and sort order
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_view::app::{Catalog, ViewParams};
//! use catalog_view::store::{ItemStore, LoadPolicy, MockFetcher};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn run() -> catalog_view::Result<()> {
//! let fetcher = MockFetcher::with_sample_catalog(Duration::from_millis(600), 0.1)?;
//! let catalog = Catalog::new(ItemStore::new(Arc::new(fetcher), LoadPolicy::default()), ViewParams::default());
//!
//! let mut view = catalog.view();
//! catalog.load();
//! catalog.set_search("blade");
//! let visible = view.wait_for(|items| !items.is_empty()).await;
//! # Ok(())
//! # }
//! ```

use super::engine::{DerivedView, ViewInputs, ViewSnapshot, ViewStream};
use super::params::{CategoryFilter, SortKey, ViewParams, ALL_CATEGORIES};
use crate::domain::{Item, ItemId};
use crate::store::{ItemStore, StoreState};
use crate::ui::viewmodel::CatalogViewModel;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Store, UI parameters and derived view in one handle.
#[derive(Debug)]
pub struct Catalog {
    store: ItemStore,
    search: watch::Sender<String>,
    category: watch::Sender<CategoryFilter>,
    sort: watch::Sender<SortKey>,
    view: DerivedView,
}

impl Catalog {
    /// Wires `store` to a freshly spawned derived view seeded with `params`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn new(store: ItemStore, params: ViewParams) -> Self {
        let (search, search_rx) = watch::channel(params.search);
        let (category, category_rx) = watch::channel(params.category);
        let (sort, sort_rx) = watch::channel(params.sort);

        let view = DerivedView::spawn(ViewInputs {
            items: store.items(),
            search: search_rx,
            category: category_rx,
            sort: sort_rx,
        });

        tracing::debug!(policy = ?store.policy(), "catalog initialized");

        Self {
            store,
            search,
            category,
            sort,
            view,
        }
    }

    /// Begins a load. See [`ItemStore::load`].
    pub fn load(&self) -> JoinHandle<()> {
        self.store.load()
    }

    /// Deactivates an item. See [`ItemStore::deactivate`].
    pub fn deactivate(&self, id: ItemId) -> bool {
        self.store.deactivate(id)
    }

    /// Sets the search text. Returns `false` if it was already current.
    pub fn set_search(&self, search: impl Into<String>) -> bool {
        let search = search.into();
        self.search.send_if_modified(|current| {
            if *current == search {
                return false;
            }
            tracing::trace!(search = %search, "search text updated");
            *current = search;
            true
        })
    }

    /// Sets the category selector from its raw value (`"all"` clears the filter).
    pub fn set_category(&self, category: &str) -> bool {
        let category = CategoryFilter::from_input(category);
        self.category.send_if_modified(|current| {
            if *current == category {
                return false;
            }
            tracing::debug!(category = %category, "category filter updated");
            *current = category;
            true
        })
    }

    /// Sets the sort order from its raw selector value.
    pub fn set_sort(&self, sort: &str) -> bool {
        self.set_sort_key(SortKey::from_input(sort))
    }

    /// Sets the sort order.
    pub fn set_sort_key(&self, sort: SortKey) -> bool {
        self.sort.send_if_modified(|current| {
            if *current == sort {
                return false;
            }
            tracing::debug!(sort = %sort, "sort key updated");
            *current = sort;
            true
        })
    }

    /// Current UI parameters.
    #[must_use]
    pub fn params(&self) -> ViewParams {
        ViewParams {
            search: self.search.borrow().clone(),
            category: self.category.borrow().clone(),
            sort: *self.sort.borrow(),
        }
    }

    /// Subscribes to the derived sequence.
    #[must_use]
    pub fn view(&self) -> ViewStream {
        self.view.subscribe()
    }

    /// The most recently published derived sequence.
    #[must_use]
    pub fn current_view(&self) -> Option<ViewSnapshot> {
        self.view.current()
    }

    /// Subscribes to the loading flag.
    #[must_use]
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.store.loading()
    }

    /// Subscribes to the error message.
    #[must_use]
    pub fn error(&self) -> watch::Receiver<Option<String>> {
        self.store.error()
    }

    /// Items, loading and error read together.
    #[must_use]
    pub fn status(&self) -> StoreState {
        self.store.state()
    }

    #[must_use]
    pub const fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Category selector options: the "all" sentinel followed by the distinct
    /// categories of active items in store order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let snapshot = self.store.snapshot();
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for item in snapshot.iter().filter(|item| item.is_active) {
            if !categories[1..].contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }

    /// Builds the view model for `items` (normally the latest derived sequence).
    #[must_use]
    pub fn compute_viewmodel(&self, items: &[Item]) -> CatalogViewModel {
        CatalogViewModel::compute(items, &self.params(), &self.status())
    }
}
