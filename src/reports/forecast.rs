//! Forecast Report
//!
//! Projects next month's income and expense for each registered member
//! from their monthly average over a window of complete months.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::error::LedgerResult;
use crate::models::Member;
use crate::storage::TransactionStore;

use super::{window_transactions, ReportPeriod};

/// Projection for one member
#[derive(Debug, Clone, PartialEq)]
pub struct MemberForecast {
    pub member: Member,
    /// Average monthly income over the window
    pub income: f64,
    /// Average monthly expense over the window
    pub expense: f64,
}

impl MemberForecast {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Forecast Report
#[derive(Debug, Clone)]
pub struct ForecastReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Number of months the totals were divided by
    pub months: u32,
    /// One row per registered member, in registration order
    pub members: Vec<MemberForecast>,
}

impl ForecastReport {
    /// Generate the forecast for `period` as seen on `today`
    pub fn generate(
        store: &mut TransactionStore,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> LedgerResult<Self> {
        let (start_date, end_date) = period.range(today);
        let transactions = window_transactions(store, start_date, end_date)?;
        let months = period.months();

        let mut totals: HashMap<&Member, (f64, f64)> = HashMap::new();
        for txn in &transactions {
            let entry = totals.entry(txn.member()).or_insert((0.0, 0.0));
            if txn.is_income() {
                entry.0 += txn.amount();
            } else {
                entry.1 += txn.amount();
            }
        }

        let members = store
            .members()
            .iter()
            .map(|member| {
                let (income, expense) = totals.get(member).copied().unwrap_or((0.0, 0.0));
                MemberForecast {
                    member: member.clone(),
                    income: income / f64::from(months),
                    expense: expense / f64::from(months),
                }
            })
            .collect();

        Ok(Self {
            start_date,
            end_date,
            months,
            members,
        })
    }

    /// Household income projection
    pub fn total_income(&self) -> f64 {
        self.members.iter().map(|m| m.income).sum()
    }

    /// Household expense projection
    pub fn total_expense(&self) -> f64 {
        self.members.iter().map(|m| m.expense).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Forecast (monthly average of {} to {}, {} months)\n",
            self.start_date, self.end_date, self.months
        ));
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>15} {:>15} {:>15}\n",
            "Member", "Income", "Expense", "Net"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for row in &self.members {
            output.push_str(&format!(
                "{:<22} {:>15} {:>15} {:>15}\n",
                row.member.name(),
                format!("{}{:.2}", currency, row.income),
                format!("{}{:.2}", currency, row.expense),
                format!("{}{:.2}", currency, row.net()),
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>15} {:>15} {:>15}\n",
            "HOUSEHOLD",
            format!("{}{:.2}", currency, self.total_income()),
            format!("{}{:.2}", currency, self.total_expense()),
            format!("{}{:.2}", currency, self.total_income() - self.total_expense()),
        ));

        output
    }
}
