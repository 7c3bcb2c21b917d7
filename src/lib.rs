//! Hearth - household shared-expense ledger
//!
//! This library provides the core functionality for the Hearth CLI. Members
//! record shared expenses split between them; the balance engine nets the
//! splits into one "A owes B" figure per pair and suggests a short list of
//! payments that settles everyone up.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (members, expenses, splits, settlements, chores)
//! - `engine`: Pairwise balance netting and settlement simplification
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`, `display`, `export`: Output formatting
//! - `cli`: Command handlers for the `hearth` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use hearth::engine::{compute_balances, simplify_settlements};
//!
//! let balances = compute_balances(&members, &expenses)?;
//! let payments = simplify_settlements(&balances);
//! ```

use std::sync::Once;

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{HearthError, HearthResult};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber
///
/// The filter comes from `HEARTH_LOG`, then `RUST_LOG`, falling back to
/// warnings only. Output goes to stderr so exports to stdout stay clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_env("HEARTH_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("hearth=warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
