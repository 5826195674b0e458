//! Error types for the catalog.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Note that the item store never hands these errors to the presentation layer:
//! a failed load is absorbed into the store's error channel as a fixed message.

use thiserror::Error;

/// The main error type for catalog operations.
///
/// # Examples
///
/// ```
/// use catalog_view::CatalogError;
///
/// fn validate_rate(rate: f64) -> Result<(), CatalogError> {
///     if (0.0..=1.0).contains(&rate) {
///         Ok(())
///     } else {
///         Err(CatalogError::Config(format!("failure_rate out of range: {rate}")))
///     }
/// }
///
/// assert!(validate_rate(1.5).is_err());
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Fetching the item collection failed.
    ///
    /// Produced by [`ItemFetcher`](crate::store::ItemFetcher) implementations.
    /// The string carries the underlying cause, which is logged but never shown
    /// to the user.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML configuration file could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// An item collection could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
