//! Configuration module for the household ledger
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution and per-user file creation
//! - The explicit user session
//! - User settings persistence

pub mod paths;
pub mod session;
pub mod settings;

pub use paths::LedgerPaths;
pub use session::UserSession;
pub use settings::{ReloadPolicy, Settings};
