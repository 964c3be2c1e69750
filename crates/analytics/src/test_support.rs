use chrono::NaiveDateTime;
use core_types::{MarketType, Trade, TradeDirection, TradeStatus, parse_trade_time};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub(crate) fn at(raw: &str) -> NaiveDateTime {
    parse_trade_time(raw).unwrap()
}

/// A closed long stock trade entered (and, lacking an exit date, closed) at `date`.
pub(crate) fn closed_trade(symbol: &str, pnl: Decimal, date: &str) -> Trade {
    Trade {
        id: format!("{symbol}-{date}"),
        symbol: symbol.to_string(),
        market: MarketType::Stock,
        direction: TradeDirection::Long,
        entry_price: dec!(100),
        exit_price: None,
        quantity: dec!(1),
        stop_loss: None,
        take_profit: None,
        status: TradeStatus::Closed,
        profit_loss: Some(pnl),
        profit_loss_percent: None,
        risk_reward: None,
        setup: None,
        trade_date: at(date),
        exit_date: None,
    }
}
