//! Catalog View: a filterable, sortable item catalog over a reactive store.
//!
//! The crate provides:
//! - An item store owning the authoritative collection plus loading/error status
//! - An asynchronous, fallible load through a pluggable fetch capability
//! - Copy-on-write item deactivation
//! - A derived view that recombines items, search text, category and sort order
//!   whenever any of them changes
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Presentation layer (external)                      │  ← widgets, rendering
//! └─────────────────────────────────────────────────────┘
//!          │ setters / Event            ▲ ViewStream, loading, error
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Catalog facade                                   │
//! │  - CombineLatest over four watch channels           │
//! │  - active → search → category → sort pipeline       │
//! └─────────────────────────────────────────────────────┘
//!          │                                  │
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ Store Layer (store/)      │   │ UI Layer (ui/)            │
//! │ - ItemStore snapshots     │   │ - View model computation  │
//! │ - load / deactivate       │   │                           │
//! │ - ItemFetcher seam        │   │                           │
//! └───────────────────────────┘   └───────────────────────────┘
//!          │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Item model, error types (domain/)                │
//! │  - Config file location (infrastructure/)           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: UI parameters, derived-view pipeline and engine, catalog facade
//! - [`domain`]: Core domain types (Item, errors)
//! - [`store`]: Item store and fetch abstraction
//! - [`ui`]: View models for the presentation layer
//! - [`infrastructure`]: Config path helpers
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! ```toml
//! fetch_delay_ms = 600
//! failure_rate = 0.1
//! load_policy = "last-write-wins"   # or "latest-request-wins"
//! search = ""
//! category = "all"
//! sort = "title-asc"
//! trace_level = "info"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_view::{initialize, Config};
//!
//! # async fn run() -> catalog_view::Result<()> {
//! let catalog = initialize(&Config::default())?;
//! let mut view = catalog.view();
//!
//! catalog.load();
//! catalog.set_sort("price-asc");
//!
//! if let Some(items) = view.next().await {
//!     for item in items.iter() {
//!         println!("{} {:.2}", item.title, item.price);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Key Design Decisions
//!
//! ## Watch Channels as Observables
//!
//! Every observable (items, loading, error, UI parameters, derived output) is a
//! `tokio::sync::watch` channel: a new receiver sees the current value at once and
//! every later value, and slow receivers skip to the newest.
//!
//! ## Copy-on-Write Snapshots
//!
//! The collection is an `Arc<Vec<Item>>` replaced wholesale on load or
//! deactivation, so a snapshot held by a subscriber is never mutated.
//!
//! ## Overlapping Loads
//!
//! By default the last fetch to resolve wins, with no cancellation.
//! `load_policy = "latest-request-wins"` discards results of superseded loads.

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod store;
pub mod ui;

pub use app::{handle_event, Catalog, CategoryFilter, Event, SortKey, ViewParams, ViewStream};
pub use domain::{CatalogError, Item, ItemId, Result};
pub use store::{ItemFetcher, ItemStore, LoadPolicy, LOAD_FAILED_MESSAGE};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Catalog configuration.
///
/// Every field has a default, so an empty TOML document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Delay of the simulated fetch in milliseconds. Default: 600
    pub fetch_delay_ms: u64,

    /// Probability in `[0, 1]` that a simulated fetch fails. Default: 0.1
    pub failure_rate: f64,

    /// How overlapping loads are resolved. Default: last write wins.
    pub load_policy: LoadPolicy,

    /// Initial search text. Default: empty
    pub search: String,

    /// Initial category selector value. Default: `"all"`
    pub category: String,

    /// Initial sort selector value. Default: `"title-asc"`
    pub sort: String,

    /// Tracing filter directive, e.g. `"debug"` or `"catalog_view=trace"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_delay_ms: 600,
            failure_rate: store::DEFAULT_FAILURE_RATE,
            load_policy: LoadPolicy::default(),
            search: String::new(),
            category: app::ALL_CATEGORIES.to_string(),
            sort: SortKey::default().to_string(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Toml`] on malformed input or unknown keys, and
    /// [`CatalogError::Config`] if validation fails.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Builds a configuration from string key/value pairs.
    ///
    /// Used for `key=value` overrides. Parsing is lenient: unknown keys are
    /// ignored and unparseable values fall back to their defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `fetch_delay_ms`: String → `u64` (falls back to 600)
    /// - `failure_rate`: String → `f64` within `[0, 1]` (falls back to 0.1)
    /// - `load_policy`: `last-write-wins` | `latest-request-wins`
    /// - `search`, `category`, `sort`, `trace_level`: taken verbatim
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use catalog_view::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("sort".to_string(), "price-desc".to_string());
    /// map.insert("fetch_delay_ms".to_string(), "oops".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.sort, "price-desc");
    /// assert_eq!(config.fetch_delay_ms, 600);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().merge_map(map)
    }

    /// Applies key/value overrides on top of `self` with [`Config::from_map`] rules.
    #[must_use]
    pub fn merge_map(self, map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let fetch_delay_ms = map
            .get("fetch_delay_ms")
            .map_or(self.fetch_delay_ms, |s| s.parse().unwrap_or(defaults.fetch_delay_ms));

        let failure_rate = map.get("failure_rate").map_or(self.failure_rate, |s| {
            s.parse::<f64>()
                .ok()
                .filter(|rate| (0.0..=1.0).contains(rate))
                .unwrap_or(defaults.failure_rate)
        });

        let load_policy = map
            .get("load_policy")
            .map_or(self.load_policy, |s| s.parse().unwrap_or(defaults.load_policy));

        Self {
            fetch_delay_ms,
            failure_rate,
            load_policy,
            search: map.get("search").cloned().unwrap_or(self.search),
            category: map.get("category").cloned().unwrap_or(self.category),
            sort: map.get("sort").cloned().unwrap_or(self.sort),
            trace_level: map.get("trace_level").cloned().or(self.trace_level),
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if `failure_rate` is outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(CatalogError::Config(format!(
                "failure_rate must be between 0 and 1, got {}",
                self.failure_rate
            )));
        }
        Ok(())
    }

    /// Simulated fetch delay.
    #[must_use]
    pub const fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    /// Initial UI parameters.
    #[must_use]
    pub fn view_params(&self) -> ViewParams {
        ViewParams::from_inputs(&self.search, &self.category, &self.sort)
    }
}

/// Builds a catalog backed by the simulated fetch over the bundled sample data.
///
/// The store starts empty and idle; call [`Catalog::load`] to populate it.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the bundled catalog
/// cannot be parsed.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime.
pub fn initialize(config: &Config) -> Result<Catalog> {
    config.validate()?;
    let fetcher = store::MockFetcher::with_sample_catalog(config.fetch_delay(), config.failure_rate)?;
    Ok(initialize_with_fetcher(config, Arc::new(fetcher)))
}

/// Builds a catalog over an arbitrary fetcher.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime.
#[must_use]
pub fn initialize_with_fetcher(config: &Config, fetcher: Arc<dyn ItemFetcher>) -> Catalog {
    tracing::debug!(
        fetch_delay_ms = config.fetch_delay_ms,
        failure_rate = config.failure_rate,
        load_policy = ?config.load_policy,
        "initializing catalog"
    );

    let store = ItemStore::new(fetcher, config.load_policy);
    Catalog::new(store, config.view_params())
}
