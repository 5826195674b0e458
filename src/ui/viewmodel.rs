//! View model types representing renderable catalog state.
//!
//! This module defines immutable view models computed from the derived sequence
//! and the store status. View models are display-ready: prices are formatted,
//! search matches carry highlight ranges and the empty/loading/error states are
//! resolved, so a renderer only has to lay them out.
//!
//! # Example
//!
//! ```rust
//! use catalog_view::app::ViewParams;
//! use catalog_view::store::StoreState;
//! use catalog_view::ui::CatalogViewModel;
//! use catalog_view::Item;
//!
//! let items = vec![Item::new(5, "Fine-Point Blade", "Precision blade", 19.99, "Accessories")];
//! let vm = CatalogViewModel::compute(&items, &ViewParams::from_inputs("blade", "all", "title-asc"), &StoreState::default());
//!
//! assert_eq!(vm.rows[0].price, "$19.99");
//! assert_eq!(vm.header.title, " Products (1) ");
//! ```

use crate::app::params::ViewParams;
use crate::domain::{Item, ItemId};
use crate::store::StoreState;
use chrono::{DateTime, Utc};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Complete catalog view model.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogViewModel {
    /// One row per visible item, in derived order.
    pub rows: Vec<ItemRow>,

    pub header: HeaderInfo,

    /// Loading or error banner, if either applies.
    pub status: Option<StatusBanner>,

    /// Shown when no rows are visible and nothing is loading.
    pub empty_state: Option<EmptyState>,
}

/// Display information for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    /// Needed by the deactivate control.
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,

    /// Price formatted with two decimals.
    pub price: String,

    /// Byte ranges `(start, end)` of the title matching the search text.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// e.g. "Updated 5m ago"; `None` before the first successful load.
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusBanner {
    Loading,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

impl CatalogViewModel {
    /// Builds the view model for the derived `items`.
    ///
    /// `params` supplies the search text used for highlighting; `status` supplies
    /// loading, error and last-load time. `status.items` is only consulted to
    /// tell "nothing loaded yet" apart from "nothing matches".
    #[must_use]
    pub fn compute(items: &[Item], params: &ViewParams, status: &StoreState) -> Self {
        let rows = items.iter().map(|item| compute_row(item, &params.search)).collect();

        let banner = if status.loading {
            Some(StatusBanner::Loading)
        } else {
            status.error.clone().map(StatusBanner::Error)
        };

        let empty_state = if items.is_empty() && !status.loading {
            Some(compute_empty_state(params, status))
        } else {
            None
        };

        Self {
            rows,
            header: HeaderInfo {
                title: format!(" Products ({}) ", items.len()),
                subtitle: status.loaded_at.map(|at| format!("Updated {}", time_ago(at, Utc::now()))),
            },
            status: banner,
            empty_state,
        }
    }
}

fn compute_row(item: &Item, search: &str) -> ItemRow {
    ItemRow {
        id: item.id,
        title: item.title.clone(),
        description: item.description.clone(),
        category: item.category.clone(),
        image_url: item.image_url.clone(),
        price: format!("${:.2}", item.price),
        highlight_ranges: highlight_ranges(&item.title, search),
    }
}

fn compute_empty_state(params: &ViewParams, status: &StoreState) -> EmptyState {
    if status.items.is_empty() {
        EmptyState {
            message: "No products loaded".to_string(),
            subtitle: "Load the catalog to get started".to_string(),
        }
    } else if params.search.is_empty() {
        EmptyState {
            message: "No products found".to_string(),
            subtitle: format!("Nothing active in category \"{}\"", params.category),
        }
    } else {
        EmptyState {
            message: "No products found".to_string(),
            subtitle: format!("Nothing matches \"{}\"", params.search),
        }
    }
}

/// Non-overlapping case-insensitive occurrences of `search` in `text`.
///
/// Ranges index into `text`. Matching is done on a per-character lowercase fold,
/// so characters whose lowercase form has a different byte length are compared
/// but not mis-indexed.
#[must_use]
pub fn highlight_ranges(text: &str, search: &str) -> Vec<(usize, usize)> {
    if search.is_empty() {
        return vec![];
    }

    let needle: Vec<char> = search.chars().flat_map(char::to_lowercase).collect();
    let haystack: Vec<(usize, char)> = text
        .char_indices()
        .flat_map(|(offset, c)| c.to_lowercase().map(move |lower| (offset, lower)))
        .collect();

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= haystack.len() {
        let window = &haystack[start..start + needle.len()];
        if window.iter().map(|(_, c)| *c).eq(needle.iter().copied()) {
            let begin = window[0].0;
            let last = window[needle.len() - 1].0;
            // A match may end partway through one source character's lowercase
            // expansion; the whole character is highlighted.
            let end = haystack[start + needle.len()..]
                .iter()
                .map(|(offset, _)| *offset)
                .find(|offset| *offset > last)
                .unwrap_or(text.len());
            ranges.push((begin, end));
            start += needle.len();
            while haystack.get(start).is_some_and(|(offset, _)| *offset < end) {
                start += 1;
            }
        } else {
            start += 1;
        }
    }
    ranges
}

/// Human-readable age: "just now", "5m ago", "3h ago", "7d ago".
#[must_use]
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - then).num_seconds();

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}
