//! Time-bucketed P&L series and the equity curve.
//!
//! Daily, monthly and hourly buckets are keyed by the trade's closing time
//! (exit date, falling back to the entry date). The weekday series is keyed by
//! the entry date instead: it answers "which days do I open good trades on",
//! not "when do my trades pay out".

use crate::math::percent;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use core_types::time::serde_trade_time;
use core_types::{Trade, TradeOutcome};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Weekday buckets in reporting order.
pub const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPnL {
    pub date: NaiveDate,
    pub pnl: Decimal,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakeven: usize,
}

/// A calendar month, ordered chronologically and written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("'{s}' is not in YYYY-MM form"))?;
        let year: i32 = year.parse().map_err(|_| format!("bad year in '{s}'"))?;
        let month: u32 = month.parse().map_err(|_| format!("bad month in '{s}'"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("month out of range in '{s}'"));
        }
        Ok(Self { year, month })
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPnL {
    pub month: YearMonth,
    pub pnl: Decimal,
    pub trades: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOfWeekPnL {
    pub day: Weekday,
    pub pnl: Decimal,
    pub trades: usize,
    pub win_rate: Decimal,
}

impl DayOfWeekPnL {
    pub fn day_name(&self) -> &'static str {
        match self.day {
            Weekday::Sun => "Sunday",
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPnL {
    pub hour: u32,
    pub pnl: Decimal,
    pub trades: usize,
}

/// Cumulative P&L after each closed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    #[serde(with = "serde_trade_time")]
    pub closed_at: NaiveDateTime,
    pub symbol: String,
    pub pnl: Decimal,
    pub equity: Decimal,
}

pub fn daily(trades: &[&Trade]) -> Vec<DailyPnL> {
    let mut buckets: BTreeMap<NaiveDate, DailyPnL> = BTreeMap::new();
    for trade in trades {
        let date = trade.closed_at().date();
        let bucket = buckets.entry(date).or_insert_with(|| DailyPnL {
            date,
            pnl: Decimal::ZERO,
            trades: 0,
            wins: 0,
            losses: 0,
            breakeven: 0,
        });
        bucket.pnl = bucket.pnl.saturating_add(trade.realized_pnl());
        bucket.trades += 1;
        match trade.outcome() {
            TradeOutcome::Win => bucket.wins += 1,
            TradeOutcome::Loss => bucket.losses += 1,
            TradeOutcome::BreakEven => bucket.breakeven += 1,
        }
    }
    buckets.into_values().collect()
}

pub fn monthly(trades: &[&Trade]) -> Vec<MonthlyPnL> {
    let mut buckets: BTreeMap<YearMonth, MonthlyPnL> = BTreeMap::new();
    for trade in trades {
        let month = YearMonth::of(trade.closed_at().date());
        let bucket = buckets.entry(month).or_insert_with(|| MonthlyPnL {
            month,
            pnl: Decimal::ZERO,
            trades: 0,
        });
        bucket.pnl = bucket.pnl.saturating_add(trade.realized_pnl());
        bucket.trades += 1;
    }
    buckets.into_values().collect()
}

/// Seven buckets, Sunday through Saturday, keyed by entry date.
pub fn day_of_week(trades: &[&Trade]) -> Vec<DayOfWeekPnL> {
    let mut tallies = [(Decimal::ZERO, 0usize, 0usize); 7];
    for trade in trades {
        let slot = &mut tallies[trade.trade_date.weekday().num_days_from_sunday() as usize];
        slot.0 = slot.0.saturating_add(trade.realized_pnl());
        slot.1 += 1;
        if trade.outcome() == TradeOutcome::Win {
            slot.2 += 1;
        }
    }

    WEEK.iter()
        .zip(tallies)
        .map(|(&day, (pnl, count, wins))| DayOfWeekPnL {
            day,
            pnl,
            trades: count,
            win_rate: percent(wins, count),
        })
        .collect()
}

/// Twenty-four buckets, hour 0 through 23, keyed by closing time.
pub fn hourly(trades: &[&Trade]) -> Vec<HourlyPnL> {
    let mut tallies = [(Decimal::ZERO, 0usize); 24];
    for trade in trades {
        let slot = &mut tallies[trade.closed_at().hour() as usize];
        slot.0 = slot.0.saturating_add(trade.realized_pnl());
        slot.1 += 1;
    }

    tallies
        .into_iter()
        .enumerate()
        .map(|(hour, (pnl, count))| HourlyPnL {
            hour: hour as u32,
            pnl,
            trades: count,
        })
        .collect()
}

/// Expects trades already in chronological order.
pub fn equity_curve(trades: &[&Trade]) -> Vec<EquityPoint> {
    let mut equity = Decimal::ZERO;
    trades
        .iter()
        .map(|trade| {
            let pnl = trade.realized_pnl();
            equity = equity.saturating_add(pnl);
            EquityPoint {
                closed_at: trade.closed_at(),
                symbol: trade.symbol.clone(),
                pnl,
                equity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, closed_trade};
    use rust_decimal_macros::dec;

    #[test]
    fn daily_buckets_use_exit_date_and_count_outcomes() {
        let mut exited_later = closed_trade("AAPL", dec!(40), "2024-03-04");
        exited_later.exit_date = Some(at("2024-03-06T15:30:00"));
        let trades = [
            closed_trade("AAPL", dec!(-10), "2024-03-06"),
            exited_later,
            closed_trade("MSFT", dec!(0), "2024-03-05"),
        ];
        let refs: Vec<&Trade> = trades.iter().collect();

        let days = daily(&refs);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date.to_string(), "2024-03-05");
        assert_eq!(days[0].breakeven, 1);
        assert_eq!(days[1].date.to_string(), "2024-03-06");
        assert_eq!(days[1].pnl, dec!(30));
        assert_eq!((days[1].wins, days[1].losses, days[1].trades), (1, 1, 2));
    }

    #[test]
    fn monthly_buckets_ascend_across_years() {
        let trades = [
            closed_trade("AAPL", dec!(5), "2024-01-15"),
            closed_trade("AAPL", dec!(7), "2023-12-31"),
            closed_trade("AAPL", dec!(-2), "2024-01-02"),
        ];
        let refs: Vec<&Trade> = trades.iter().collect();

        let months = monthly(&refs);
        let keys: Vec<String> = months.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(keys, ["2023-12", "2024-01"]);
        assert_eq!(months[1].pnl, dec!(3));
        assert_eq!(months[1].trades, 2);
    }

    #[test]
    fn weekday_uses_entry_date_not_exit_date() {
        // Entered Friday 2024-03-01, exited Monday 2024-03-04.
        let mut swing = closed_trade("AAPL", dec!(90), "2024-03-01");
        swing.exit_date = Some(at("2024-03-04T10:00:00"));
        let refs = vec![&swing];

        let week = day_of_week(&refs);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].day_name(), "Sunday");
        let friday = &week[5];
        assert_eq!(friday.day, Weekday::Fri);
        assert_eq!(friday.trades, 1);
        assert_eq!(friday.win_rate, dec!(100));
        assert_eq!(week[1].trades, 0);
        assert_eq!(week[1].win_rate, Decimal::ZERO);
    }

    #[test]
    fn hourly_uses_closing_hour() {
        let mut trade = closed_trade("EURUSD", dec!(-15), "2024-03-01T08:00:00");
        trade.exit_date = Some(at("2024-03-01T16:45:00"));
        let refs = vec![&trade];

        let hours = hourly(&refs);
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[16].trades, 1);
        assert_eq!(hours[16].pnl, dec!(-15));
        assert_eq!(hours[8].trades, 0);
    }

    #[test]
    fn equity_curve_accumulates() {
        let trades = [
            closed_trade("AAPL", dec!(100), "2024-01-01"),
            closed_trade("AAPL", dec!(-30), "2024-01-02"),
        ];
        let refs: Vec<&Trade> = trades.iter().collect();

        let curve = equity_curve(&refs);
        assert_eq!(curve.iter().map(|p| p.equity).collect::<Vec<_>>(), [dec!(100), dec!(70)]);
    }

    #[test]
    fn year_month_round_trips_through_text() {
        let month: YearMonth = "2024-07".parse().unwrap();
        assert_eq!(month, YearMonth { year: 2024, month: 7 });
        assert_eq!(month.to_string(), "2024-07");
        assert!("2024-13".parse::<YearMonth>().is_err());
    }
}
