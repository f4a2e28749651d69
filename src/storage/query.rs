//! Query engine
//!
//! Two read-only entry points over a `TransactionStore`:
//!
//! - `query` filters on attributes (exact date or month, category, member,
//!   kind) with at most one sort applied.
//! - `query_range` filters on an inclusive date range and applies the amount
//!   and date sorts as independent passes, one after the other.
//!
//! Both return a freshly collected `Vec`; call again for a fresh view.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Member, Transaction, TransactionKind, YearMonth};

use super::transactions::TransactionStore;

/// Options for the attribute query
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    /// Only transactions on this exact date
    pub exact_date: Option<NaiveDate>,
    /// Only transactions in this month
    pub month: Option<YearMonth>,
    /// Only transactions with this category
    pub category: Option<Category>,
    /// Only transactions attributed to this member
    pub member: Option<Member>,
    /// Only income or only expense
    pub kind: Option<TransactionKind>,
    /// Sort ascending by amount
    pub sort_by_amount: bool,
    /// Sort by date, newest first
    pub sort_by_date_desc: bool,
}

impl TransactionQuery {
    /// Create a new empty query
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exact_date(mut self, date: NaiveDate) -> Self {
        self.exact_date = Some(date);
        self
    }

    pub fn month(mut self, month: YearMonth) -> Self {
        self.month = Some(month);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.member = Some(member);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn sort_by_amount(mut self) -> Self {
        self.sort_by_amount = true;
        self
    }

    pub fn sort_by_date_desc(mut self) -> Self {
        self.sort_by_date_desc = true;
        self
    }

    /// Reject option combinations the query does not support
    pub fn validate(&self) -> LedgerResult<()> {
        if self.exact_date.is_some() && self.month.is_some() {
            return Err(LedgerError::ConflictingFilter);
        }
        if (self.exact_date.is_some() || self.month.is_some()) && self.sort_by_date_desc {
            return Err(LedgerError::ConflictingSort);
        }
        Ok(())
    }
}

/// Options for the date-range query
#[derive(Debug, Clone, Default)]
pub struct RangeQuery {
    /// Inclusive start; the range applies only when `end` is also set
    pub start: Option<NaiveDate>,
    /// Inclusive end; the range applies only when `start` is also set
    pub end: Option<NaiveDate>,
    pub category: Option<Category>,
    pub member: Option<Member>,
    /// `Some(true)` for income only, `Some(false)` for expense only
    pub is_income: Option<bool>,
    pub sort_by_amount: bool,
    pub sort_by_date_desc: bool,
}

impl RangeQuery {
    /// Create a new empty query
    pub fn new() -> Self {
        Self::default()
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.member = Some(member);
        self
    }

    pub fn income(mut self, is_income: bool) -> Self {
        self.is_income = Some(is_income);
        self
    }

    pub fn sort_by_amount(mut self) -> Self {
        self.sort_by_amount = true;
        self
    }

    pub fn sort_by_date_desc(mut self) -> Self {
        self.sort_by_date_desc = true;
        self
    }

    /// Reject a range whose start lies after its end
    pub fn validate(&self) -> LedgerResult<()> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => {
                Err(LedgerError::InvalidRange { start, end })
            }
            _ => Ok(()),
        }
    }
}

impl TransactionStore {
    /// Filter by attributes, then apply at most one sort.
    ///
    /// Filters run in order: kind, exact date, month, category, member.
    /// Amount sorting wins when both sort flags are set.
    pub fn query(&self, query: &TransactionQuery) -> LedgerResult<Vec<Transaction>> {
        query.validate()?;

        let mut results: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| query.kind.map_or(true, |k| t.kind() == k))
            .filter(|t| query.exact_date.map_or(true, |d| t.date() == Some(d)))
            .filter(|t| query.month.map_or(true, |m| t.month() == Some(m)))
            .filter(|t| query.category.map_or(true, |c| t.category() == c))
            .filter(|t| query.member.as_ref().map_or(true, |m| t.member() == m))
            .cloned()
            .collect();

        if query.sort_by_amount {
            sort_by_amount(&mut results);
        } else if query.sort_by_date_desc {
            sort_by_date_desc(&mut results);
        }

        Ok(results)
    }

    /// Filter by an inclusive date range and attributes, then apply the
    /// amount sort and the date sort as separate passes.
    ///
    /// With both flags set the final order is newest first, with amount
    /// order kept among transactions on the same date.
    pub fn query_range(&self, query: &RangeQuery) -> LedgerResult<Vec<Transaction>> {
        query.validate()?;

        let kind = query.is_income.map(TransactionKind::from_is_income);
        let range = query.start.zip(query.end);

        let mut results: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| kind.map_or(true, |k| t.kind() == k))
            .filter(|t| range.map_or(true, |(start, end)| t.is_within(start, end)))
            .filter(|t| query.category.map_or(true, |c| t.category() == c))
            .filter(|t| query.member.as_ref().map_or(true, |m| t.member() == m))
            .cloned()
            .collect();

        if query.sort_by_amount {
            sort_by_amount(&mut results);
        }
        if query.sort_by_date_desc {
            sort_by_date_desc(&mut results);
        }

        Ok(results)
    }
}

/// Stable ascending sort by amount
fn sort_by_amount(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| a.amount().total_cmp(&b.amount()));
}

/// Stable sort, newest first; undated transactions go last
fn sort_by_date_desc(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| match (a.date(), b.date()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
