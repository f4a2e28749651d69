//! Reports module for the household ledger
//!
//! Aggregations over a window of complete months: monthly trend, category
//! breakdown, member summary and a per-member forecast. Every report
//! refreshes the store from disk before querying.

pub mod categories;
pub mod forecast;
pub mod members;
pub mod period;
pub mod trend;

pub use categories::{CategoryBreakdownReport, CategoryTotal};
pub use forecast::{ForecastReport, MemberForecast};
pub use members::{MemberSummaryReport, MemberTotals};
pub use period::ReportPeriod;
pub use trend::{MonthTotals, MonthlyTrendReport};

use chrono::NaiveDate;

use crate::error::LedgerResult;
use crate::models::Transaction;
use crate::storage::{RangeQuery, TransactionStore};

/// Refresh the store, then fetch the window newest first
fn window_transactions(
    store: &mut TransactionStore,
    start: NaiveDate,
    end: NaiveDate,
) -> LedgerResult<Vec<Transaction>> {
    store.refresh()?;
    store.query_range(&RangeQuery::new().between(start, end).sort_by_date_desc())
}
