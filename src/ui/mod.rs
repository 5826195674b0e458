//! Presentation-facing view models.
//!
//! Rendering itself belongs to the presentation layer; this module only turns a
//! derived sequence plus store status into display-ready data.
//!
//! ```text
//! ViewStream → derived items ─┐
//! ItemStore::state ───────────┼→ CatalogViewModel::compute → renderer
//! ViewParams ─────────────────┘
//! ```

pub mod viewmodel;

pub use viewmodel::{CatalogViewModel, EmptyState, HeaderInfo, ItemRow, StatusBanner};
