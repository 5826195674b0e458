//! Structured logging setup.
//!
//! The library only emits `tracing` events and spans; installing a subscriber is
//! left to the binary (or to whoever embeds the catalog) through
//! [`init_tracing`].
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`

mod init;

pub use init::init_tracing;
