//! Member Summary Report
//!
//! Income and expense totals per household member over a window.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::error::LedgerResult;
use crate::storage::TransactionStore;

use super::{window_transactions, ReportPeriod};

/// Totals for one member
#[derive(Debug, Clone, PartialEq)]
pub struct MemberTotals {
    pub name: String,
    pub income: f64,
    pub expense: f64,
}

impl MemberTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Member Summary Report
#[derive(Debug, Clone)]
pub struct MemberSummaryReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Members with any transaction in the window, ordered by name
    pub members: Vec<MemberTotals>,
}

impl MemberSummaryReport {
    /// Generate the summary for `period` as seen on `today`
    pub fn generate(
        store: &mut TransactionStore,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> LedgerResult<Self> {
        let (start_date, end_date) = period.range(today);
        let transactions = window_transactions(store, start_date, end_date)?;

        let mut by_name: BTreeMap<&str, MemberTotals> = BTreeMap::new();
        for txn in &transactions {
            let name = txn.member().name();
            let totals = by_name.entry(name).or_insert_with(|| MemberTotals {
                name: name.to_string(),
                income: 0.0,
                expense: 0.0,
            });
            if txn.is_income() {
                totals.income += txn.amount();
            } else {
                totals.expense += txn.amount();
            }
        }

        Ok(Self {
            start_date,
            end_date,
            members: by_name.into_values().collect(),
        })
    }

    /// Find a member's row by exact name
    pub fn get(&self, name: &str) -> Option<&MemberTotals> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Members: {} to {}\n",
            self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(70));
        output.push('\n');

        if self.members.is_empty() {
            output.push_str("No transactions in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<22} {:>15} {:>15} {:>15}\n",
            "Member", "Income", "Expense", "Net"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for row in &self.members {
            output.push_str(&format!(
                "{:<22} {:>15} {:>15} {:>15}\n",
                row.name,
                format!("{}{:.2}", currency, row.income),
                format!("{}{:.2}", currency, row.expense),
                format!("{}{:.2}", currency, row.net()),
            ));
        }

        output
    }
}
