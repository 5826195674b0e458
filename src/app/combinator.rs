//! Combine-latest over the four derived-view inputs.
//!
//! [`CombineLatest`] remembers the most recent value of each input. Every time an
//! input arrives it recomputes the derived view from the latest value of all four,
//! but only once each input has been seen at least once. It never produces output
//! on its own; output only ever follows an input.

use super::params::{CategoryFilter, SortKey, ViewParams};
use super::pipeline::derive_view;
use crate::domain::Item;
use crate::store::Snapshot;

/// Latest known value of every derived-view input.
#[derive(Debug, Clone, Default)]
pub struct CombineLatest {
    items: Option<Snapshot>,
    search: Option<String>,
    category: Option<CategoryFilter>,
    sort: Option<SortKey>,
}

impl CombineLatest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new item snapshot and recomputes if every input is known.
    pub fn push_items(&mut self, items: Snapshot) -> Option<Vec<Item>> {
        self.items = Some(items);
        self.recompute()
    }

    /// Records new search text and recomputes if every input is known.
    pub fn push_search(&mut self, search: String) -> Option<Vec<Item>> {
        self.search = Some(search);
        self.recompute()
    }

    /// Records a new category selection and recomputes if every input is known.
    pub fn push_category(&mut self, category: CategoryFilter) -> Option<Vec<Item>> {
        self.category = Some(category);
        self.recompute()
    }

    /// Records a new sort key and recomputes if every input is known.
    pub fn push_sort(&mut self, sort: SortKey) -> Option<Vec<Item>> {
        self.sort = Some(sort);
        self.recompute()
    }

    /// The UI parameters, once all three have been seen.
    #[must_use]
    pub fn params(&self) -> Option<ViewParams> {
        Some(ViewParams {
            search: self.search.clone()?,
            category: self.category.clone()?,
            sort: self.sort?,
        })
    }

    /// Whether all four inputs have been seen.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.items.is_some() && self.search.is_some() && self.category.is_some() && self.sort.is_some()
    }

    fn recompute(&self) -> Option<Vec<Item>> {
        let items = self.items.as_ref()?;
        let params = self.params()?;
        Some(derive_view(items, &params))
    }
}
