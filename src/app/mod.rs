//! Application layer: UI parameters, the derived-view engine and the catalog facade.
//!
//! # Architecture
//!
//! Data flows one way; the engine never writes back to the store:
//!
//! ```text
//! Presentation → Event / setters → parameter channels ─┐
//!                                                       ├→ CombineLatest → derive_view → ViewStream
//! Presentation → load / deactivate → ItemStore items ───┘
//! ```
//!
//! # Modules
//!
//! - [`params`]: Search, category and sort parameter types
//! - [`pipeline`]: The four-stage filter/sort pipeline
//! - [`combinator`]: Latest-value combination of the four inputs
//! - [`engine`]: Background task publishing the derived sequence
//! - [`state`]: The [`Catalog`] facade
//! - [`handler`]: Presentation events dispatched onto the facade

pub mod combinator;
pub mod engine;
pub mod handler;
pub mod params;
pub mod pipeline;
pub mod state;

pub use combinator::CombineLatest;
pub use engine::{DerivedView, ViewInputs, ViewSnapshot, ViewStream};
pub use handler::{handle_event, Event};
pub use params::{CategoryFilter, SortKey, ViewParams, ALL_CATEGORIES};
pub use pipeline::{derive_view, locale_compare};
pub use state::Catalog;
