//! Performance tables grouped by symbol, setup and market.

use crate::math::{mean, percent};
use core_types::{MarketType, Trade, TradeOutcome};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Label for trades journaled without a setup.
pub const NO_SETUP_LABEL: &str = "No Setup";

/// One row of a performance table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPerformance<K> {
    pub key: K,
    pub trades: usize,
    pub win_rate: Decimal,
    pub total_pnl: Decimal,
    pub average_pnl: Decimal,
}

#[derive(Debug, Default)]
struct GroupTally {
    trades: usize,
    wins: usize,
    total_pnl: Decimal,
}

impl GroupTally {
    fn record(&mut self, trade: &Trade) {
        self.trades += 1;
        self.total_pnl = self.total_pnl.saturating_add(trade.realized_pnl());
        if trade.outcome() == TradeOutcome::Win {
            self.wins += 1;
        }
    }

    fn into_row<K>(self, key: K) -> GroupPerformance<K> {
        GroupPerformance {
            key,
            trades: self.trades,
            win_rate: percent(self.wins, self.trades),
            total_pnl: self.total_pnl,
            average_pnl: mean(self.total_pnl, self.trades),
        }
    }
}

/// Groups trades by `key_of` and returns one row per group, highest total P&L
/// first. Groups with equal totals keep the order in which they first appear.
pub fn group_performance<K, F>(trades: &[&Trade], key_of: F) -> Vec<GroupPerformance<K>>
where
    K: Eq + Hash,
    F: Fn(&Trade) -> K,
{
    let mut groups: IndexMap<K, GroupTally> = IndexMap::new();
    for &trade in trades {
        groups.entry(key_of(trade)).or_default().record(trade);
    }

    let mut rows: Vec<GroupPerformance<K>> = groups
        .into_iter()
        .map(|(key, tally)| tally.into_row(key))
        .collect();
    rows.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));
    rows
}

pub fn by_symbol(trades: &[&Trade]) -> Vec<GroupPerformance<String>> {
    group_performance(trades, |trade| trade.symbol.trim().to_uppercase())
}

pub fn by_setup(trades: &[&Trade]) -> Vec<GroupPerformance<String>> {
    group_performance(trades, |trade| {
        trade.setup_label().unwrap_or(NO_SETUP_LABEL).to_string()
    })
}

pub fn by_market(trades: &[&Trade]) -> Vec<GroupPerformance<MarketType>> {
    group_performance(trades, |trade| trade.market)
}
