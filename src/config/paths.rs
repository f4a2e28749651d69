//! Path management for the household ledger
//!
//! Provides XDG-compliant path resolution for configuration and per-user
//! transaction files.
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/household-ledger` or `~/.config/household-ledger`
//! 3. Windows: `%APPDATA%\household-ledger`

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing::info;

use crate::error::LedgerError;

use super::session::UserSession;

/// Manages all paths used by the ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    /// Base directory for all ledger data
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Create a new LedgerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = if let Ok(custom) = std::env::var("LEDGER_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the directory holding per-user transaction files
    pub fn userdata_dir(&self) -> PathBuf {
        self.base_dir.join("userdata")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path of a user's transaction file without touching the disk
    pub fn user_file(&self, session: &UserSession) -> PathBuf {
        self.userdata_dir()
            .join(format!("{}.csv", session.username()))
    }

    /// Resolve a user's transaction file, creating the directory and an
    /// empty file if they are missing
    pub fn resolve_user_file(&self, session: &UserSession) -> Result<PathBuf, LedgerError> {
        std::fs::create_dir_all(self.userdata_dir()).map_err(|e| {
            LedgerError::Io(format!("Failed to create userdata directory: {}", e))
        })?;

        let path = self.user_file(session);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => info!(user = session.username(), "created new ledger file"),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                info!(user = session.username(), "using existing ledger file")
            }
            Err(e) => {
                return Err(LedgerError::Io(format!(
                    "Failed to create {}: {}",
                    path.display(),
                    e
                )))
            }
        }

        Ok(path)
    }

    /// Ensure the base and userdata directories exist
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.userdata_dir()).map_err(|e| {
            LedgerError::Io(format!("Failed to create userdata directory: {}", e))
        })?;

        Ok(())
    }

    /// List usernames that already have a transaction file
    pub fn known_users(&self) -> Result<Vec<String>, LedgerError> {
        let dir = self.userdata_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut users: Vec<String> = std::fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        users.sort();
        Ok(users)
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("household-ledger"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| LedgerError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("household-ledger"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| LedgerError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("household-ledger"))
}
