//! Item store: the authoritative collection and its load/error status.
//!
//! # Modules
//!
//! - `fetch`: the pluggable "fetch all items" capability and its simulated implementations
//! - `item_store`: the store itself, publishing items, loading and error on watch channels

pub mod fetch;
pub mod item_store;

pub use fetch::{
    sample_catalog, FixedFetcher, ItemFetcher, MockFetcher, DEFAULT_FAILURE_RATE,
    DEFAULT_FETCH_DELAY,
};
pub use item_store::{ItemStore, LoadPolicy, Snapshot, StoreState, LOAD_FAILED_MESSAGE};
