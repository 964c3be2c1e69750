use crate::error::StoreError;
use chrono::{Datelike, Days, Months, NaiveDate};
use core_types::Trade;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A reporting window, inclusive on both ends, matched against entry dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PeriodBounds")]
pub struct AnalyticsPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Unchecked wire form of [`AnalyticsPeriod`].
#[derive(Deserialize)]
struct PeriodBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<PeriodBounds> for AnalyticsPeriod {
    type Error = StoreError;

    fn try_from(bounds: PeriodBounds) -> Result<Self, Self::Error> {
        AnalyticsPeriod::new(bounds.start, bounds.end)
    }
}

impl AnalyticsPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, StoreError> {
        if start > end {
            return Err(StoreError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, trade: &Trade) -> bool {
        let entered = trade.trade_date.date();
        self.start <= entered && entered <= self.end
    }
}

impl fmt::Display for AnalyticsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// The quick-pick ranges offered next to a custom date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodPreset {
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "this-month")]
    ThisMonth,
    #[serde(rename = "last-month")]
    LastMonth,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "all")]
    AllTime,
}

impl PeriodPreset {
    /// Journals start no earlier than this.
    pub fn epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Resolves the preset against `today`.
    pub fn resolve(&self, today: NaiveDate) -> AnalyticsPeriod {
        let days_back = |days: u64| today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        let first_of_month = |date: NaiveDate| date.with_day(1).unwrap_or(date);

        let (start, end) = match self {
            PeriodPreset::Last7Days => (days_back(7), today),
            PeriodPreset::Last30Days => (days_back(30), today),
            PeriodPreset::Last90Days => (days_back(90), today),
            PeriodPreset::ThisMonth => (first_of_month(today), today),
            PeriodPreset::LastMonth => {
                let this_month = first_of_month(today);
                let start = this_month.checked_sub_months(Months::new(1)).unwrap_or(this_month);
                let end = this_month.pred_opt().unwrap_or(this_month);
                (start, end)
            }
            PeriodPreset::YearToDate => (today.with_ordinal(1).unwrap_or(today), today),
            PeriodPreset::AllTime => (Self::epoch().min(today), today),
        };
        AnalyticsPeriod { start, end }
    }
}

impl FromStr for PeriodPreset {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7d" => Ok(PeriodPreset::Last7Days),
            "30d" => Ok(PeriodPreset::Last30Days),
            "90d" => Ok(PeriodPreset::Last90Days),
            "this-month" => Ok(PeriodPreset::ThisMonth),
            "last-month" => Ok(PeriodPreset::LastMonth),
            "ytd" => Ok(PeriodPreset::YearToDate),
            "all" => Ok(PeriodPreset::AllTime),
            other => Err(StoreError::UnknownPreset(other.to_string())),
        }
    }
}
