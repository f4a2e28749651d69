//! Custom error types for the household ledger
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions. Every failure surfaces to the caller;
//! nothing in the library is fatal to the process.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A record line did not carry enough fields
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The `Type:CATEGORY` field could not be split into exactly two parts
    #[error("Category field must be in the format 'Type:Category', received: {0}")]
    MalformedCategoryField(String),

    /// The category name matched neither the income nor the expense set
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// The amount field was empty or not a number
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    /// The date field was not in `yyyy-MM-dd` form
    #[error("Invalid date (expected yyyy-MM-dd): '{0}'")]
    InvalidDate(String),

    /// The id field was not a non-negative integer
    #[error("Invalid transaction id: '{0}'")]
    InvalidId(String),

    /// The member field of a record was empty
    #[error("Member cannot be empty")]
    MissingMember,

    /// The factory received no usable category
    #[error("Invalid category input")]
    InvalidCategory,

    /// Exact-date and month filters were combined
    #[error("Cannot filter by both date and month at the same time")]
    ConflictingFilter,

    /// A date filter was combined with descending-date sorting
    #[error("Cannot filter and sort by date at the same time")]
    ConflictingSort,

    /// Range start lies after range end
    #[error("Start date {start} must be before or equal to end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A username unusable as a file name
    #[error("Invalid username: '{0}'")]
    InvalidUsername(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV reader/writer errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A rename target already names another member
    #[error("Member already exists: {0}")]
    MemberExists(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl LedgerError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for members
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::transaction_not_found("42");
        assert_eq!(err.to_string(), "Transaction not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_range_display() {
        let err = LedgerError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Start date 2024-05-01 must be before or equal to end date 2024-01-01"
        );
    }

    #[test]
    fn test_member_exists_display() {
        let err = LedgerError::MemberExists("Ann".into());
        assert_eq!(err.to_string(), "Member already exists: Ann");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
