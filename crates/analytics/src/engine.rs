use crate::breakdown;
use crate::math::{fraction, mean, percent, percent_or_zero, ratio_or_zero, saturating_sum};
use crate::report::{AnalyticsBundle, AnalyticsStats, CurrentStreak, StreakKind};
use crate::series;
use core_types::{Trade, TradeOutcome};
use rust_decimal::Decimal;

/// A stateless calculator that turns the trades of a period into the full
/// analytics report.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for the period report.
    ///
    /// Only closed trades take part. The input may be in any order and may be
    /// empty; the result is then the zero-valued bundle, with all seven weekday
    /// and all twenty-four hourly buckets still present.
    pub fn calculate(&self, trades: &[Trade]) -> AnalyticsBundle {
        let closed = chronological_closed(trades);
        tracing::debug!(
            input = trades.len(),
            closed = closed.len(),
            "Calculating analytics bundle."
        );

        let stats = self.stats_for_closed(&closed);

        AnalyticsBundle {
            stats,
            symbol_performance: breakdown::by_symbol(&closed),
            setup_performance: breakdown::by_setup(&closed),
            market_performance: breakdown::by_market(&closed),
            daily_pnl: series::daily(&closed),
            monthly_pnl: series::monthly(&closed),
            day_of_week_pnl: series::day_of_week(&closed),
            hourly_pnl: series::hourly(&closed),
            equity_curve: series::equity_curve(&closed),
            trades: closed.into_iter().cloned().collect(),
        }
    }

    /// Aggregate statistics alone, without the breakdowns and series. Accepts
    /// the same unfiltered, unordered input as [`Self::calculate`].
    pub fn calculate_stats(&self, trades: &[Trade]) -> AnalyticsStats {
        self.stats_for_closed(&chronological_closed(trades))
    }

    fn stats_for_closed(&self, closed: &[&Trade]) -> AnalyticsStats {
        let mut stats = AnalyticsStats::new();
        if closed.is_empty() {
            return stats;
        }

        self.calculate_profitability(closed, &mut stats);
        self.calculate_drawdown(closed, &mut stats);
        self.calculate_time_metrics(closed, &mut stats);
        self.calculate_streaks(closed, &mut stats);

        stats
    }

    /// Calculates all profitability-related metrics.
    fn calculate_profitability(&self, closed: &[&Trade], stats: &mut AnalyticsStats) {
        stats.total_trades = closed.len();
        stats.best_trade = Decimal::MIN;
        stats.worst_trade = Decimal::MAX;

        for trade in closed {
            let pnl = trade.realized_pnl();
            stats.total_pnl = stats.total_pnl.saturating_add(pnl);
            stats.best_trade = stats.best_trade.max(pnl);
            stats.worst_trade = stats.worst_trade.min(pnl);

            match trade.outcome() {
                TradeOutcome::Win => {
                    stats.gross_profit = stats.gross_profit.saturating_add(pnl);
                    stats.winning_trades += 1;
                }
                TradeOutcome::Loss => {
                    stats.gross_loss = stats.gross_loss.saturating_add(pnl.abs());
                    stats.losing_trades += 1;
                }
                TradeOutcome::BreakEven => stats.break_even_trades += 1,
            }
        }

        // --- Ratios ---
        stats.win_rate = percent(stats.winning_trades, stats.total_trades);
        stats.profit_factor = ratio_or_zero(stats.gross_profit, stats.gross_loss);
        stats.average_win = mean(stats.gross_profit, stats.winning_trades);
        stats.average_loss = mean(stats.gross_loss, stats.losing_trades);
        stats.payoff_ratio = ratio_or_zero(stats.average_win, stats.average_loss);

        let win_fraction = fraction(stats.winning_trades, stats.total_trades);
        let loss_fraction = fraction(stats.losing_trades, stats.total_trades);
        stats.expectancy = win_fraction
            .saturating_mul(stats.average_win)
            .saturating_sub(loss_fraction.saturating_mul(stats.average_loss));
    }

    /// Walks the equity curve from zero and records the deepest fall from a
    /// prior peak, along with that peak.
    fn calculate_drawdown(&self, closed: &[&Trade], stats: &mut AnalyticsStats) {
        let mut equity = Decimal::ZERO;
        let mut peak = Decimal::ZERO;
        let mut max_drawdown = Decimal::ZERO;
        let mut peak_at_max_drawdown = Decimal::ZERO;

        for trade in closed {
            equity = equity.saturating_add(trade.realized_pnl());
            if equity > peak {
                peak = equity;
            }
            let drawdown = peak.saturating_sub(equity);
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
                peak_at_max_drawdown = peak;
            }
        }

        stats.max_drawdown = max_drawdown;
        stats.max_drawdown_percent = percent_or_zero(max_drawdown, peak_at_max_drawdown);
    }

    /// Mean holding time over trades with a recorded exit.
    fn calculate_time_metrics(&self, closed: &[&Trade], stats: &mut AnalyticsStats) {
        let durations: Vec<Decimal> = closed.iter().filter_map(|trade| trade.duration_days()).collect();
        stats.average_trade_duration = mean(saturating_sum(durations.iter().copied()), durations.len());
    }

    /// Longest runs of wins and losses, and the run ending at the last trade.
    /// A breakeven trade ends both runs.
    fn calculate_streaks(&self, closed: &[&Trade], stats: &mut AnalyticsStats) {
        let mut win_run = 0usize;
        let mut loss_run = 0usize;

        for trade in closed {
            match trade.outcome() {
                TradeOutcome::Win => {
                    win_run += 1;
                    loss_run = 0;
                    stats.longest_win_streak = stats.longest_win_streak.max(win_run);
                }
                TradeOutcome::Loss => {
                    loss_run += 1;
                    win_run = 0;
                    stats.longest_lose_streak = stats.longest_lose_streak.max(loss_run);
                }
                TradeOutcome::BreakEven => {
                    win_run = 0;
                    loss_run = 0;
                }
            }
        }

        stats.current_streak = match closed.last().map(|trade| trade.outcome()) {
            Some(TradeOutcome::Win) => CurrentStreak { kind: StreakKind::Win, count: win_run },
            Some(TradeOutcome::Loss) => CurrentStreak { kind: StreakKind::Loss, count: loss_run },
            _ => CurrentStreak::none(),
        };
    }
}

/// Convenience wrapper around [`AnalyticsEngine::calculate`].
pub fn compute_analytics(trades: &[Trade]) -> AnalyticsBundle {
    AnalyticsEngine::new().calculate(trades)
}

/// Closed trades ordered by closing time. The sort is stable, so trades closed
/// at the same instant keep their input order.
pub fn chronological_closed(trades: &[Trade]) -> Vec<&Trade> {
    let mut closed: Vec<&Trade> = trades.iter().filter(|trade| trade.is_closed()).collect();
    closed.sort_by_key(|trade| trade.closed_at());
    closed
}
