//! Member model
//!
//! A member is a participant in the household ledger, identified by name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A household member
///
/// Equality is by exact name; registry lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    name: String,
}

impl Member {
    /// Create a new member
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The member's full name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the member
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Check if this member matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }

    /// Normalize a member name for matching
    pub fn normalize_name(name: &str) -> String {
        name.to_lowercase()
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Member {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
