//! The dashboard snapshot: a smaller aggregation over every trade in the
//! journal, independent of any reporting period.

use crate::math::{mean, percent, ratio_or_zero, saturating_sum};
use core_types::{MarketType, Trade, TradeOutcome, TradeStatus};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of trades listed under "recent trades" unless configured otherwise.
pub const DEFAULT_RECENT_TRADES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_pnl: Decimal,
    /// Wins over closed trades.
    pub win_rate: Decimal,
    /// Every trade in the journal, whatever its status.
    pub total_trades: usize,
    pub average_risk_reward: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
    pub profit_factor: Decimal,
    pub open_trades: usize,
}

impl DashboardStats {
    pub fn from_trades(trades: &[Trade]) -> Self {
        let closed: Vec<&Trade> = trades.iter().filter(|t| t.is_closed()).collect();
        let open_trades = trades.iter().filter(|t| t.status == TradeStatus::Open).count();

        let mut total_pnl = Decimal::ZERO;
        let mut gross_profit = Decimal::ZERO;
        let mut gross_loss = Decimal::ZERO;
        let mut wins = 0usize;
        for trade in &closed {
            let pnl = trade.realized_pnl();
            total_pnl = total_pnl.saturating_add(pnl);
            match trade.outcome() {
                TradeOutcome::Win => {
                    gross_profit = gross_profit.saturating_add(pnl);
                    wins += 1;
                }
                TradeOutcome::Loss => gross_loss = gross_loss.saturating_add(pnl.abs()),
                TradeOutcome::BreakEven => {}
            }
        }

        let risk_rewards: Vec<Decimal> = closed.iter().filter_map(|t| t.risk_reward).collect();
        let best_trade = closed.iter().map(|t| t.realized_pnl()).max().unwrap_or(Decimal::ZERO);
        let worst_trade = closed.iter().map(|t| t.realized_pnl()).min().unwrap_or(Decimal::ZERO);

        Self {
            total_pnl,
            win_rate: percent(wins, closed.len()),
            total_trades: trades.len(),
            average_risk_reward: mean(saturating_sum(risk_rewards.iter().copied()), risk_rewards.len()),
            best_trade,
            worst_trade,
            profit_factor: ratio_or_zero(gross_profit, gross_loss),
            open_trades,
        }
    }
}

/// How many trades were placed in each market, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketShare {
    pub market: MarketType,
    pub trades: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    /// Most recent entries first.
    pub recent_trades: Vec<Trade>,
    pub market_distribution: Vec<MarketShare>,
}

impl DashboardSnapshot {
    pub fn build(trades: &[Trade], recent: usize) -> Self {
        tracing::debug!(trades = trades.len(), recent, "Building dashboard snapshot.");

        let mut newest_first: Vec<&Trade> = trades.iter().collect();
        newest_first.sort_by(|a, b| b.trade_date.cmp(&a.trade_date));
        let recent_trades = newest_first.into_iter().take(recent).cloned().collect();

        let mut counts: IndexMap<MarketType, usize> = IndexMap::new();
        for trade in trades {
            *counts.entry(trade.market).or_default() += 1;
        }
        let market_distribution = counts
            .into_iter()
            .map(|(market, trades)| MarketShare { market, trades })
            .collect();

        Self {
            stats: DashboardStats::from_trades(trades),
            recent_trades,
            market_distribution,
        }
    }
}
