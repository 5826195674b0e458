//! The derived-view pipeline.
//!
//! [`derive_view`] turns a store snapshot and the current [`ViewParams`] into the
//! sequence the presentation layer shows. The stages always run in this order,
//! each on the output of the previous one:
//!
//! 1. **Active filter**: drop items with `is_active == false`
//! 2. **Search filter**: case-insensitive substring match on title, description or category
//! 3. **Category filter**: exact, case-sensitive category equality unless the selector is "all"
//! 4. **Sort**: stable sort by the selected [`SortKey`]
//!
//! Nothing is cached between calls; every recomputation starts from the raw
//! collection.

use super::params::{CategoryFilter, SortKey, ViewParams};
use crate::domain::Item;
use feruca::Collator;
use std::cmp::Ordering;

/// Runs the four pipeline stages over `items`.
///
/// # Example
///
/// ```rust
/// use catalog_view::app::{derive_view, ViewParams};
/// use catalog_view::Item;
///
/// let items = vec![Item::new(1, "Blade", "Sharp", 19.99, "Accessories")];
/// let params = ViewParams::from_inputs("blade", "all", "title-asc");
///
/// assert_eq!(derive_view(&items, &params), items);
/// ```
#[must_use]
pub fn derive_view(items: &[Item], params: &ViewParams) -> Vec<Item> {
    let _span = tracing::debug_span!(
        "derive_view",
        total_items = items.len(),
        search_len = params.search.len(),
        category = %params.category,
        sort = %params.sort
    )
    .entered();

    let mut result = retain_active(items);
    result = apply_search(result, &params.search);
    result = apply_category(result, &params.category);
    apply_sort(&mut result, params.sort);

    tracing::debug!(visible_count = result.len(), "derived view recomputed");

    result.into_iter().cloned().collect()
}

fn retain_active(items: &[Item]) -> Vec<&Item> {
    items.iter().filter(|item| item.is_active).collect()
}

fn apply_search<'a>(items: Vec<&'a Item>, search: &str) -> Vec<&'a Item> {
    if search.is_empty() {
        return items;
    }
    let needle = search.to_lowercase();
    items.into_iter().filter(|item| item.matches_search(&needle)).collect()
}

fn apply_category<'a>(items: Vec<&'a Item>, category: &CategoryFilter) -> Vec<&'a Item> {
    if *category == CategoryFilter::All {
        return items;
    }
    items.into_iter().filter(|item| category.accepts(&item.category)).collect()
}

/// `sort_by` is stable, so equal keys keep store order.
fn apply_sort(items: &mut [&Item], sort: SortKey) {
    match sort {
        SortKey::TitleAsc => {
            let mut collator = Collator::default();
            items.sort_by(|a, b| collator.collate(a.title.as_str(), b.title.as_str()));
        }
        SortKey::TitleDesc => {
            let mut collator = Collator::default();
            items.sort_by(|a, b| collator.collate(b.title.as_str(), a.title.as_str()));
        }
        SortKey::PriceAsc => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => items.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Unsorted => {}
    }
}

/// Locale-aware string comparison using the Unicode Collation Algorithm with
/// the CLDR root collation.
///
/// Accents and case are secondary and tertiary differences, so "Éclair" sorts
/// with the E's and "apple" comes just before "Apple". Strings that collate
/// equal are ordered by their bytes, which makes the order total.
///
/// Builds a fresh [`Collator`] per call; sorting reuses one collator instead.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}
