//! Reporting windows
//!
//! Every window ends on the last day of the previous month, so reports only
//! cover complete months.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// How far back a report looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    #[default]
    ThreeMonths,
    SixMonths,
    Annual,
}

impl ReportPeriod {
    pub const ALL: &'static [ReportPeriod] = &[Self::ThreeMonths, Self::SixMonths, Self::Annual];

    /// Number of complete months covered
    pub fn months(&self) -> u32 {
        match self {
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
            Self::Annual => 12,
        }
    }

    /// Short label as accepted on the command line
    pub fn label(&self) -> &'static str {
        match self {
            Self::ThreeMonths => "3m",
            Self::SixMonths => "6m",
            Self::Annual => "annual",
        }
    }

    /// Parse `3m`, `6m` or `annual` (case-insensitive)
    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        match s.trim().to_lowercase().as_str() {
            "3m" | "3" | "three" => Ok(Self::ThreeMonths),
            "6m" | "6" | "six" => Ok(Self::SixMonths),
            "annual" | "12m" | "12" | "year" => Ok(Self::Annual),
            _ => Err(LedgerError::Config(format!(
                "Unknown report period '{}' (expected 3m, 6m or annual)",
                s
            ))),
        }
    }

    /// Inclusive date range for a report run on `today`
    pub fn range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let first_of_month = today.with_day(1).unwrap_or(today);
        let end = first_of_month - Duration::days(1);
        let start = first_of_month
            .checked_sub_months(Months::new(self.months()))
            .unwrap_or(NaiveDate::MIN);
        (start, end)
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ReportPeriod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_is_three_months() {
        assert_eq!(ReportPeriod::default(), ReportPeriod::ThreeMonths);
    }

    #[test]
    fn test_parse() {
        assert_eq!(ReportPeriod::parse("3m").unwrap(), ReportPeriod::ThreeMonths);
        assert_eq!(ReportPeriod::parse("6M").unwrap(), ReportPeriod::SixMonths);
        assert_eq!(ReportPeriod::parse("annual").unwrap(), ReportPeriod::Annual);
        assert!(ReportPeriod::parse("weekly").is_err());
    }

    #[test]
    fn test_range_three_months() {
        let (start, end) = ReportPeriod::ThreeMonths.range(date(2024, 5, 17));
        assert_eq!(start, date(2024, 2, 1));
        assert_eq!(end, date(2024, 4, 30));
    }

    #[test]
    fn test_range_crosses_year() {
        let (start, end) = ReportPeriod::SixMonths.range(date(2024, 3, 1));
        assert_eq!(start, date(2023, 9, 1));
        assert_eq!(end, date(2024, 2, 29));

        let (start, end) = ReportPeriod::Annual.range(date(2024, 1, 31));
        assert_eq!(start, date(2023, 1, 1));
        assert_eq!(end, date(2023, 12, 31));
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&ReportPeriod::SixMonths).unwrap();
        assert_eq!(json, "\"six_months\"");
        let parsed: ReportPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ReportPeriod::SixMonths);
    }
}
