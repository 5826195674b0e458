//! Presentation events and their dispatch onto the catalog.
//!
//! Adapters that receive raw UI input (widgets, a terminal, an HTTP layer) can
//! translate it into [`Event`]s and hand them to [`handle_event`] instead of
//! calling the [`Catalog`] methods one by one.
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_view::app::{handle_event, Catalog, Event};
//!
//! # fn run(catalog: &Catalog) {
//! handle_event(catalog, &Event::SetSearch("blade".to_string()));
//! handle_event(catalog, &Event::Deactivate(5));
//! # }
//! ```

use super::state::Catalog;
use crate::domain::ItemId;
use serde::Deserialize;

/// Events raised by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Event {
    /// Begin (or restart) loading the collection.
    Load,
    /// Deactivate the item with this identifier.
    Deactivate(ItemId),
    /// New search text.
    SetSearch(String),
    /// New raw category selector value.
    SetCategory(String),
    /// New raw sort selector value.
    SetSort(String),
}

/// Applies `event` to `catalog`.
///
/// Returns `true` if the event changed an input of the derived view (or started
/// a load), `false` if it was a no-op such as deactivating an unknown item or
/// re-selecting the current sort key.
pub fn handle_event(catalog: &Catalog, event: &Event) -> bool {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Load => {
            // The handle is not needed: progress is observed through the
            // loading and error channels.
            drop(catalog.load());
            true
        }
        Event::Deactivate(id) => catalog.deactivate(*id),
        Event::SetSearch(search) => catalog.set_search(search.clone()),
        Event::SetCategory(category) => catalog.set_category(category),
        Event::SetSort(sort) => catalog.set_sort(sort),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_deserialize_from_tagged_json() {
        let events: Vec<Event> = serde_json::from_str(
            r#"[
                {"type": "load"},
                {"type": "deactivate", "value": 3},
                {"type": "set-search", "value": "vinyl"},
                {"type": "set-category", "value": "all"},
                {"type": "set-sort", "value": "price-desc"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                Event::Load,
                Event::Deactivate(3),
                Event::SetSearch("vinyl".to_string()),
                Event::SetCategory("all".to_string()),
                Event::SetSort("price-desc".to_string()),
            ]
        );
    }
}
