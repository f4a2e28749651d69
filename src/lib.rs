//! Household Ledger - income and expense tracking for a household
//!
//! This library provides the core of the `ledger` command: a per-user,
//! CSV-backed transaction store with attribute and date-range queries, and
//! reports built on top of it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution, user session and settings
//! - `error`: Custom error types
//! - `models`: Categories, members, months and transactions
//! - `storage`: Record codec, file I/O, the transaction store and its queries
//! - `reports`: Monthly trend, category, member and forecast reports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use household_ledger::config::{LedgerPaths, Settings, UserSession};
//! use household_ledger::storage::TransactionStore;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut store = TransactionStore::open(&paths, UserSession::new("alice")?, &settings)?;
//! store.load()?;
//! ```

use std::sync::Once;

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber once.
///
/// `RUST_LOG` overrides the default `household_ledger=info` filter. Events
/// go to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("household_ledger=info"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
