use crate::breakdown::GroupPerformance;
use crate::series::{DailyPnL, DayOfWeekPnL, EquityPoint, HourlyPnL, MonthlyPnL};
use core_types::{MarketType, Trade};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of monthly buckets shown by the consumer-facing monthly chart.
pub const RECENT_MONTHS: usize = 12;

/// Direction of the run of results ending at the most recent closed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Win,
    Loss,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStreak {
    pub kind: StreakKind,
    pub count: usize,
}

impl CurrentStreak {
    pub fn none() -> Self {
        Self { kind: StreakKind::None, count: 0 }
    }
}

impl Default for CurrentStreak {
    fn default() -> Self {
        Self::none()
    }
}

/// Aggregate statistics over the closed trades of a period.
///
/// Every ratio that could be infinite or undefined (no losses, no trades) is
/// reported as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsStats {
    // I. Core Profitability Metrics
    pub total_pnl: Decimal,
    pub gross_profit: Decimal,
    pub gross_loss: Decimal,
    pub profit_factor: Decimal,
    pub expectancy: Decimal,

    // II. Trade-Level Statistics
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub break_even_trades: usize,
    pub win_rate: Decimal,
    pub average_win: Decimal,
    pub average_loss: Decimal,
    pub payoff_ratio: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,

    // III. Drawdown
    pub max_drawdown: Decimal,
    pub max_drawdown_percent: Decimal,

    // IV. Time and Sequence
    /// Mean holding time in days over trades with a recorded exit.
    pub average_trade_duration: Decimal,
    pub longest_win_streak: usize,
    pub longest_lose_streak: usize,
    pub current_streak: CurrentStreak,
}

impl AnalyticsStats {
    /// Creates a zeroed-out `AnalyticsStats`, the result for a period without
    /// closed trades.
    pub fn new() -> Self {
        Self {
            total_pnl: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            profit_factor: Decimal::ZERO,
            expectancy: Decimal::ZERO,
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            break_even_trades: 0,
            win_rate: Decimal::ZERO,
            average_win: Decimal::ZERO,
            average_loss: Decimal::ZERO,
            payoff_ratio: Decimal::ZERO,
            best_trade: Decimal::ZERO,
            worst_trade: Decimal::ZERO,
            max_drawdown: Decimal::ZERO,
            max_drawdown_percent: Decimal::ZERO,
            average_trade_duration: Decimal::ZERO,
            longest_win_streak: 0,
            longest_lose_streak: 0,
            current_streak: CurrentStreak::none(),
        }
    }
}

impl Default for AnalyticsStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the period report shows, computed in one pass of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsBundle {
    /// The closed trades the report was built from, oldest exit first.
    pub trades: Vec<Trade>,
    pub stats: AnalyticsStats,
    pub symbol_performance: Vec<GroupPerformance<String>>,
    pub setup_performance: Vec<GroupPerformance<String>>,
    pub market_performance: Vec<GroupPerformance<MarketType>>,
    pub daily_pnl: Vec<DailyPnL>,
    pub monthly_pnl: Vec<MonthlyPnL>,
    pub day_of_week_pnl: Vec<DayOfWeekPnL>,
    pub hourly_pnl: Vec<HourlyPnL>,
    pub equity_curve: Vec<EquityPoint>,
}

impl AnalyticsBundle {
    /// The last `count` monthly buckets, oldest first.
    pub fn recent_monthly(&self, count: usize) -> &[MonthlyPnL] {
        let skip = self.monthly_pnl.len().saturating_sub(count);
        &self.monthly_pnl[skip..]
    }
}
