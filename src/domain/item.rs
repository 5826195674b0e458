//! Item domain model.
//!
//! An [`Item`] is one catalog entry. Items are values: the store never mutates an
//! item in place, it replaces it with a modified copy (see [`Item::deactivated`]),
//! so a snapshot a subscriber is still holding stays valid.

use serde::{Deserialize, Serialize};

/// Stable, unique identifier of an item within a collection.
pub type ItemId = u64;

/// A catalog entry.
///
/// Serialized with camelCase keys (`imageUrl`, `isActive`) to match the item
/// feed format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    /// Non-negative price.
    pub price: f64,
    pub category: String,
    pub image_url: String,
    pub is_active: bool,
}

impl Item {
    /// Creates an active item with an empty image reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_view::Item;
    ///
    /// let item = Item::new(5, "Fine-Point Blade", "Precision blade", 19.99, "Accessories");
    /// assert!(item.is_active);
    /// assert!(item.image_url.is_empty());
    /// ```
    #[must_use]
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            price,
            category: category.into(),
            image_url: String::new(),
            is_active: true,
        }
    }

    /// Builder-style setter for the image reference.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Returns a copy of this item with `is_active` cleared.
    ///
    /// Every other field is copied unchanged. Calling this on an already inactive
    /// item yields an equal value.
    #[must_use]
    pub fn deactivated(&self) -> Self {
        Self {
            is_active: false,
            ..self.clone()
        }
    }

    /// Case-insensitive substring match against title, description and category.
    ///
    /// `needle_lower` must already be lower-cased; the pipeline lower-cases the
    /// search text once per recomputation rather than once per item.
    #[must_use]
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
            || self.category.to_lowercase().contains(needle_lower)
    }
}
