//! Transaction construction
//!
//! The factory is the single place that turns loose inputs into a
//! `Transaction`, dispatching on the category family.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};

use super::category::Category;
use super::member::Member;
use super::transaction::Transaction;

/// Builds income or expense transactions from a category
pub struct TransactionFactory;

impl TransactionFactory {
    /// Create a transaction of the family named by `category`.
    ///
    /// The result carries the placeholder id 0. A missing category is
    /// rejected with `InvalidCategory`.
    pub fn create(
        category: Option<Category>,
        amount: f64,
        date: Option<NaiveDate>,
        member: Member,
    ) -> LedgerResult<Transaction> {
        match category {
            Some(category @ Category::Income(_)) => {
                Ok(Transaction::new(category, amount, date, member))
            }
            Some(category @ Category::Expense(_)) => {
                Ok(Transaction::new(category, amount, date, member))
            }
            None => Err(LedgerError::InvalidCategory),
        }
    }
}
