//! Transaction model
//!
//! Represents one money event: an income or an expense attributed to a
//! household member. Whether a transaction is income or expense follows
//! from its category.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{Category, TransactionKind};
use super::member::Member;
use super::month::YearMonth;

/// Numeric transaction identifier, unique within a store
pub type TransactionId = u32;

/// A financial transaction
///
/// Two transactions compare equal when their ids match, regardless of the
/// other fields. Use field accessors to compare contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifier; 0 until the store assigns one
    id: TransactionId,

    /// Category, which also fixes the kind
    category: Category,

    /// Amount as entered; sign is not enforced
    amount: f64,

    /// Transaction date, absent only when a record was stored without one
    date: Option<NaiveDate>,

    /// Member the transaction is attributed to
    member: Member,
}

impl Transaction {
    /// Create a transaction with the placeholder id 0
    pub fn new(
        category: Category,
        amount: f64,
        date: Option<NaiveDate>,
        member: Member,
    ) -> Self {
        Self {
            id: 0,
            category,
            amount,
            date,
            member,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn member(&self) -> &Member {
        &self.member
    }

    /// Income or expense, derived from the category
    pub fn kind(&self) -> TransactionKind {
        self.category.kind()
    }

    pub fn is_income(&self) -> bool {
        self.category.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.category.is_expense()
    }

    /// The month the transaction falls in, if it has a date
    pub fn month(&self) -> Option<YearMonth> {
        self.date.map(YearMonth::from_date)
    }

    pub fn set_id(&mut self, id: TransactionId) {
        self.id = id;
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.amount = amount;
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    pub fn set_member(&mut self, member: Member) {
        self.member = member;
    }

    /// Check if the date falls within `start..=end`
    pub fn is_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date.is_some_and(|d| d >= start && d <= end)
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Transaction {}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        write!(
            f,
            "#{} {} {}:{} {:.2} {}",
            self.id,
            date,
            self.category.type_label(),
            self.category.name(),
            self.amount,
            self.member
        )
    }
}

/// Partial update applied by `TransactionStore::update`
///
/// Only fields that are `Some` overwrite the stored transaction.
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub category: Option<Category>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub member: Option<Member>,
}

impl TransactionUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.member = Some(member);
        self
    }

    /// True if no field would change
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.member.is_none()
    }

    /// Overwrite the present fields on `txn`
    pub fn apply_to(self, txn: &mut Transaction) {
        if let Some(category) = self.category {
            txn.set_category(category);
        }
        if let Some(amount) = self.amount {
            txn.set_amount(amount);
        }
        if let Some(date) = self.date {
            txn.set_date(Some(date));
        }
        if let Some(member) = self.member {
            txn.set_member(member);
        }
    }
}
