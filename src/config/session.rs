//! User session
//!
//! The session carries the active username explicitly, so every store is
//! bound to one user's file at construction time.

use std::fmt;

use crate::error::LedgerError;

/// The user whose ledger is being worked on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    username: String,
}

impl UserSession {
    /// Start a session for `username`.
    ///
    /// The name becomes a file name, so it must be non-empty, must not be
    /// `.` or `..`, and must not contain path separators.
    pub fn new(username: impl Into<String>) -> Result<Self, LedgerError> {
        let username = username.into();
        let trimmed = username.trim();

        if trimmed.is_empty()
            || trimmed == "."
            || trimmed == ".."
            || trimmed.contains(['/', '\\'])
            || trimmed.contains('\0')
        {
            return Err(LedgerError::InvalidUsername(username));
        }

        Ok(Self {
            username: trimmed.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Display for UserSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}
