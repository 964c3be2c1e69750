//! Terminal tables for the period report and the dashboard.

use analytics::{AnalyticsBundle, DashboardSnapshot, GroupPerformance, StreakKind};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use core_types::time::format_trade_time;
use rust_decimal::Decimal;
use std::fmt::Display;
use trade_store::AnalyticsPeriod;

pub fn print_analytics(period: &AnalyticsPeriod, bundle: &AnalyticsBundle, recent_months: usize) {
    let stats = &bundle.stats;
    println!("Performance report, {period}");

    let mut summary = table(&["Metric", "Value"]);
    let streak = match stats.current_streak.kind {
        StreakKind::Win => format!("{} win(s)", stats.current_streak.count),
        StreakKind::Loss => format!("{} loss(es)", stats.current_streak.count),
        StreakKind::None => "-".to_string(),
    };
    let rows: [(&str, String); 19] = [
        ("Total P&L", money(stats.total_pnl)),
        ("Closed trades", stats.total_trades.to_string()),
        ("Wins / Losses / Breakeven", format!(
            "{} / {} / {}",
            stats.winning_trades, stats.losing_trades, stats.break_even_trades
        )),
        ("Win rate", pct(stats.win_rate)),
        ("Profit factor", ratio(stats.profit_factor)),
        ("Average win", money(stats.average_win)),
        ("Average loss", money(stats.average_loss)),
        ("Payoff ratio", ratio(stats.payoff_ratio)),
        ("Expectancy", money(stats.expectancy)),
        ("Gross profit", money(stats.gross_profit)),
        ("Gross loss", money(stats.gross_loss)),
        ("Max drawdown", money(stats.max_drawdown)),
        ("Max drawdown %", pct(stats.max_drawdown_percent)),
        ("Best trade", money(stats.best_trade)),
        ("Worst trade", money(stats.worst_trade)),
        ("Avg. duration (days)", ratio(stats.average_trade_duration)),
        ("Longest win streak", stats.longest_win_streak.to_string()),
        ("Longest losing streak", stats.longest_lose_streak.to_string()),
        ("Current streak", streak),
    ];
    for (metric, value) in rows {
        summary.add_row(vec![metric.to_string(), value]);
    }
    println!("{summary}");

    print_groups("Symbol", &bundle.symbol_performance);
    print_groups("Setup", &bundle.setup_performance);
    print_groups("Market", &bundle.market_performance);

    let mut monthly = table(&["Month", "P&L", "Trades"]);
    for month in bundle.recent_monthly(recent_months) {
        monthly.add_row(vec![month.month.to_string(), money(month.pnl), month.trades.to_string()]);
    }
    println!("{monthly}");

    let mut weekdays = table(&["Day", "P&L", "Trades", "Win rate"]);
    for day in &bundle.day_of_week_pnl {
        weekdays.add_row(vec![
            day.day_name().to_string(),
            money(day.pnl),
            day.trades.to_string(),
            pct(day.win_rate),
        ]);
    }
    println!("{weekdays}");

    let mut hours = table(&["Hour", "P&L", "Trades"]);
    for hour in bundle.hourly_pnl.iter().filter(|h| h.trades > 0) {
        hours.add_row(vec![format!("{:02}:00", hour.hour), money(hour.pnl), hour.trades.to_string()]);
    }
    println!("{hours}");
}

pub fn print_dashboard(snapshot: &DashboardSnapshot) {
    let stats = &snapshot.stats;

    let mut summary = table(&["Metric", "Value"]);
    let rows: [(&str, String); 8] = [
        ("Total P&L", money(stats.total_pnl)),
        ("Win rate", pct(stats.win_rate)),
        ("Total trades", stats.total_trades.to_string()),
        ("Open trades", stats.open_trades.to_string()),
        ("Avg. risk/reward", format!("1:{}", ratio(stats.average_risk_reward))),
        ("Profit factor", ratio(stats.profit_factor)),
        ("Best trade", money(stats.best_trade)),
        ("Worst trade", money(stats.worst_trade)),
    ];
    for (metric, value) in rows {
        summary.add_row(vec![metric.to_string(), value]);
    }
    println!("{summary}");

    let mut recent = table(&["Date", "Symbol", "Direction", "Status", "P&L"]);
    for trade in &snapshot.recent_trades {
        recent.add_row(vec![
            format_trade_time(&trade.trade_date),
            trade.symbol.clone(),
            format!("{:?}", trade.direction),
            format!("{:?}", trade.status),
            trade.profit_loss.map(money).unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{recent}");

    let mut markets = table(&["Market", "Trades"]);
    for share in &snapshot.market_distribution {
        markets.add_row(vec![share.market.label().to_string(), share.trades.to_string()]);
    }
    println!("{markets}");
}

fn print_groups<K: Display>(label: &str, rows: &[GroupPerformance<K>]) {
    if rows.is_empty() {
        return;
    }
    let mut groups = table(&[label, "Trades", "Win rate", "Total P&L", "Avg. P&L"]);
    for row in rows {
        groups.add_row(vec![
            row.key.to_string(),
            row.trades.to_string(),
            pct(row.win_rate),
            money(row.total_pnl),
            money(row.average_pnl),
        ]);
    }
    println!("{groups}");
}

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

fn money(value: Decimal) -> String {
    value.round_dp(2).to_string()
}

fn pct(value: Decimal) -> String {
    format!("{}%", value.round_dp(1))
}

fn ratio(value: Decimal) -> String {
    value.round_dp(2).to_string()
}
