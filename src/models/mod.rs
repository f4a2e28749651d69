//! Core data models for the household ledger
//!
//! This module contains the data structures that represent the ledger
//! domain: categories, members, months, and transactions.

pub mod category;
pub mod factory;
pub mod member;
pub mod month;
pub mod transaction;

pub use category::{Category, ExpenseCategory, IncomeCategory, TransactionKind};
pub use factory::TransactionFactory;
pub use member::Member;
pub use month::{MonthParseError, YearMonth};
pub use transaction::{Transaction, TransactionId, TransactionUpdate};
