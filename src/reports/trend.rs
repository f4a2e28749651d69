//! Monthly Trend Report
//!
//! Income and expense totals per month across a reporting window.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::error::LedgerResult;
use crate::models::YearMonth;
use crate::storage::TransactionStore;

use super::{window_transactions, ReportPeriod};

/// Totals for one month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotals {
    pub month: YearMonth,
    pub income: f64,
    pub expense: f64,
}

impl MonthTotals {
    fn empty(month: YearMonth) -> Self {
        Self {
            month,
            income: 0.0,
            expense: 0.0,
        }
    }

    /// Income minus expense
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Monthly income/expense trend
#[derive(Debug, Clone)]
pub struct MonthlyTrendReport {
    /// Start date of the window
    pub start_date: NaiveDate,
    /// End date of the window
    pub end_date: NaiveDate,
    /// One row per month from the first to the last month with data,
    /// including months without any transactions
    pub months: Vec<MonthTotals>,
}

impl MonthlyTrendReport {
    /// Generate the trend for `period` as seen on `today`
    pub fn generate(
        store: &mut TransactionStore,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> LedgerResult<Self> {
        let (start_date, end_date) = period.range(today);
        let transactions = window_transactions(store, start_date, end_date)?;

        let mut by_month: BTreeMap<YearMonth, MonthTotals> = BTreeMap::new();
        for txn in &transactions {
            let Some(month) = txn.month() else {
                continue;
            };
            let totals = by_month
                .entry(month)
                .or_insert_with(|| MonthTotals::empty(month));
            if txn.is_income() {
                totals.income += txn.amount();
            } else {
                totals.expense += txn.amount();
            }
        }

        let months = match (by_month.keys().next(), by_month.keys().next_back()) {
            (Some(&first), Some(&last)) => first
                .through(last)
                .map(|m| {
                    by_month
                        .get(&m)
                        .cloned()
                        .unwrap_or_else(|| MonthTotals::empty(m))
                })
                .collect(),
            _ => Vec::new(),
        };

        Ok(Self {
            start_date,
            end_date,
            months,
        })
    }

    pub fn total_income(&self) -> f64 {
        self.months.iter().map(|m| m.income).sum()
    }

    pub fn total_expense(&self) -> f64 {
        self.months.iter().map(|m| m.expense).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Monthly Trend: {} to {}\n",
            self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("No transactions in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:>15} {:>15} {:>15}\n",
            "Month", "Income", "Expense", "Net"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.months {
            output.push_str(&format!(
                "{:<10} {:>15} {:>15} {:>15}\n",
                row.month.to_string(),
                format!("{}{:.2}", currency, row.income),
                format!("{}{:.2}", currency, row.expense),
                format!("{}{:.2}", currency, row.net()),
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>15} {:>15} {:>15}\n",
            "TOTAL",
            format!("{}{:.2}", currency, self.total_income()),
            format!("{}{:.2}", currency, self.total_expense()),
            format!("{}{:.2}", currency, self.total_income() - self.total_expense()),
        ));

        output
    }
}
