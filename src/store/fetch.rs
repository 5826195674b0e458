//! Fetch abstraction for loading the item collection.
//!
//! This module defines the [`ItemFetcher`] trait, the single capability the store
//! needs from its data source: "fetch all items". Keeping it behind a trait lets
//! tests substitute deterministic outcomes for the simulated network call.
//!
//! # Implementations
//!
//! - [`MockFetcher`]: fixed delay, fails with an independent fixed probability
//! - [`FixedFetcher`]: fixed delay, always the same outcome

use crate::domain::error::{CatalogError, Result};
use crate::domain::Item;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Delay applied by the simulated fetch, success or failure.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(600);

/// Probability that a single simulated fetch fails.
pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

const SAMPLE_CATALOG: &str = include_str!("../../data/catalog.json");

/// Source of the full item collection.
///
/// The returned future is `'static` so the store can move it onto a spawned task;
/// implementations clone whatever they need before building it.
pub trait ItemFetcher: Send + Sync {
    /// Fetches the complete item collection.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Fetch`] (or any other variant) when the collection
    /// cannot be produced. The store does not retry.
    fn fetch_all(&self) -> BoxFuture<'static, Result<Vec<Item>>>;
}

/// Parses the bundled five-item sample catalog.
///
/// # Errors
///
/// Returns [`CatalogError::Json`] if the bundled data is malformed.
pub fn sample_catalog() -> Result<Vec<Item>> {
    Ok(serde_json::from_str(SAMPLE_CATALOG)?)
}

/// Simulated remote fetch.
///
/// Every call completes after `delay`. Each call independently fails with
/// probability `failure_rate`.
#[derive(Debug, Clone)]
pub struct MockFetcher {
    items: Arc<Vec<Item>>,
    delay: Duration,
    failure_rate: f64,
}

impl MockFetcher {
    /// Creates a fetcher serving `items`.
    ///
    /// `failure_rate` is clamped to `[0, 1]`; NaN falls back to
    /// [`DEFAULT_FAILURE_RATE`].
    #[must_use]
    pub fn new(items: Vec<Item>, delay: Duration, failure_rate: f64) -> Self {
        let failure_rate = if failure_rate.is_nan() {
            DEFAULT_FAILURE_RATE
        } else {
            failure_rate.clamp(0.0, 1.0)
        };

        Self {
            items: Arc::new(items),
            delay,
            failure_rate,
        }
    }

    /// Creates a fetcher serving the bundled sample catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled catalog cannot be parsed.
    pub fn with_sample_catalog(delay: Duration, failure_rate: f64) -> Result<Self> {
        Ok(Self::new(sample_catalog()?, delay, failure_rate))
    }
}

impl ItemFetcher for MockFetcher {
    fn fetch_all(&self) -> BoxFuture<'static, Result<Vec<Item>>> {
        let should_fail = rand::rng().random_bool(self.failure_rate);
        let items = Arc::clone(&self.items);
        let delay = self.delay;

        tracing::debug!(should_fail, delay_ms = delay.as_millis() as u64, "simulated fetch started");

        async move {
            tokio::time::sleep(delay).await;
            if should_fail {
                Err(CatalogError::Fetch("Mock API error".to_string()))
            } else {
                Ok(items.as_ref().clone())
            }
        }
        .boxed()
    }
}

/// Deterministic fetch: the same outcome after the same delay, every call.
#[derive(Debug, Clone)]
pub struct FixedFetcher {
    outcome: std::result::Result<Arc<Vec<Item>>, String>,
    delay: Duration,
}

impl FixedFetcher {
    /// A fetcher that always succeeds with `items`.
    #[must_use]
    pub fn succeeding(items: Vec<Item>, delay: Duration) -> Self {
        Self {
            outcome: Ok(Arc::new(items)),
            delay,
        }
    }

    /// A fetcher that always fails with `cause`.
    #[must_use]
    pub fn failing(cause: impl Into<String>, delay: Duration) -> Self {
        Self {
            outcome: Err(cause.into()),
            delay,
        }
    }
}

impl ItemFetcher for FixedFetcher {
    fn fetch_all(&self) -> BoxFuture<'static, Result<Vec<Item>>> {
        let outcome = self.outcome.clone();
        let delay = self.delay;

        async move {
            tokio::time::sleep(delay).await;
            outcome
                .map(|items| items.as_ref().clone())
                .map_err(CatalogError::Fetch)
        }
        .boxed()
    }
}
