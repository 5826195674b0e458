//! Domain layer for the catalog.
//!
//! This module contains the core value types, independent of the reactive
//! plumbing in [`crate::store`] and [`crate::app`].
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Item value type
//!
//! # Examples
//!
//! ```
//! use catalog_view::domain::{Item, Result};
//!
//! fn blade() -> Result<Item> {
//!     Ok(Item::new(1, "Blade", "Precision blade", 19.99, "Accessories"))
//! }
//! # assert!(blade().is_ok());
//! ```

pub mod error;
pub mod item;

pub use error::{CatalogError, Result};
pub use item::{Item, ItemId};
