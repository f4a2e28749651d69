//! Category Breakdown Report
//!
//! Totals per category for one kind (income or expense) over a window.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::error::LedgerResult;
use crate::models::{Category, TransactionKind};
use crate::storage::TransactionStore;

use super::{window_transactions, ReportPeriod};

/// One category's share of the window
#[derive(Debug, Clone)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
    pub transaction_count: usize,
    /// Percentage of the kind's total
    pub percentage: f64,
}

/// Category Breakdown Report
#[derive(Debug, Clone)]
pub struct CategoryBreakdownReport {
    pub kind: TransactionKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Categories with at least one transaction, in enumeration order
    pub categories: Vec<CategoryTotal>,
    pub total: f64,
    pub total_transactions: usize,
}

impl CategoryBreakdownReport {
    /// Generate the breakdown of `kind` for `period` as seen on `today`
    pub fn generate(
        store: &mut TransactionStore,
        kind: TransactionKind,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> LedgerResult<Self> {
        let (start_date, end_date) = period.range(today);
        let transactions = window_transactions(store, start_date, end_date)?;

        let mut sums: HashMap<Category, (f64, usize)> = HashMap::new();
        let mut total = 0.0;
        let mut total_transactions = 0;

        for txn in transactions.iter().filter(|t| t.kind() == kind) {
            let entry = sums.entry(txn.category()).or_insert((0.0, 0));
            entry.0 += txn.amount();
            entry.1 += 1;
            total += txn.amount();
            total_transactions += 1;
        }

        let categories = Category::all_of(kind)
            .into_iter()
            .filter_map(|category| {
                let (sum, count) = sums.get(&category).copied()?;
                let percentage = if total == 0.0 {
                    0.0
                } else {
                    sum / total * 100.0
                };
                Some(CategoryTotal {
                    category,
                    total: sum,
                    transaction_count: count,
                    percentage,
                })
            })
            .collect();

        Ok(Self {
            kind,
            start_date,
            end_date,
            categories,
            total,
            total_transactions,
        })
    }

    /// Get the largest categories by total
    pub fn top_categories(&self, limit: usize) -> Vec<&CategoryTotal> {
        let mut all: Vec<_> = self.categories.iter().collect();
        all.sort_by(|a, b| b.total.total_cmp(&a.total));
        all.into_iter().take(limit).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} by Category: {} to {}\n",
            self.kind.label(),
            self.start_date,
            self.end_date
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!(
            "{:<25} {:>15} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<25} {:>15} {:>8} {:>7.1}%\n",
                row.category.name(),
                format!("{}{:.2}", currency, row.total),
                row.transaction_count,
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<25} {:>15} {:>8}\n",
            "TOTAL",
            format!("{}{:.2}", currency, self.total),
            self.total_transactions
        ));

        output
    }

    /// Format the `limit` largest categories, ranked by total
    pub fn format_top(&self, limit: usize, currency: &str) -> String {
        let top = self.top_categories(limit);
        let mut output = format!("Top {} {}:\n", top.len(), self.kind.label());

        for (rank, row) in top.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {:<25} {:>15} {:>7.1}%\n",
                rank + 1,
                row.category.name(),
                format!("{}{:.2}", currency, row.total),
                row.percentage
            ));
        }

        output
    }
}
