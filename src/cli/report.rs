//! CLI commands for reports

use clap::Subcommand;

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::TransactionKind;
use crate::reports::{
    CategoryBreakdownReport, ForecastReport, MemberSummaryReport, MonthlyTrendReport, ReportPeriod,
};
use crate::storage::TransactionStore;

use super::transaction::KindArg;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Monthly income and expense totals
    Trend {
        /// Window: 3m, 6m or annual
        #[arg(short, long)]
        period: Option<ReportPeriod>,
    },

    /// Totals per category for one kind
    Categories {
        /// Window: 3m, 6m or annual
        #[arg(short, long)]
        period: Option<ReportPeriod>,
        /// Which family to break down
        #[arg(short, long, value_enum, default_value = "expense")]
        kind: KindArg,
        /// Also rank the N largest categories
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Income and expense per member
    Members {
        /// Window: 3m, 6m or annual
        #[arg(short, long)]
        period: Option<ReportPeriod>,
    },

    /// Projected monthly income and expense per member
    #[command(alias = "prediction")]
    Forecast {
        /// Window: 3m, 6m or annual
        #[arg(short, long)]
        period: Option<ReportPeriod>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    store: &mut TransactionStore,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let today = chrono::Local::now().date_naive();
    let currency = settings.currency_symbol.as_str();
    let period_or_default = |p: Option<ReportPeriod>| p.unwrap_or(settings.default_report_period);

    match cmd {
        ReportCommands::Trend { period } => {
            let report = MonthlyTrendReport::generate(store, period_or_default(period), today)?;
            print!("{}", report.format_terminal(currency));
        }
        ReportCommands::Categories { period, kind, top } => {
            let kind: TransactionKind = kind.into();
            let report =
                CategoryBreakdownReport::generate(store, kind, period_or_default(period), today)?;
            print!("{}", report.format_terminal(currency));
            if let Some(limit) = top {
                println!();
                print!("{}", report.format_top(limit, currency));
            }
        }
        ReportCommands::Members { period } => {
            let report = MemberSummaryReport::generate(store, period_or_default(period), today)?;
            print!("{}", report.format_terminal(currency));
        }
        ReportCommands::Forecast { period } => {
            let report = ForecastReport::generate(store, period_or_default(period), today)?;
            print!("{}", report.format_terminal(currency));
        }
    }

    Ok(())
}
