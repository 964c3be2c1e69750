use crate::enums::{MarketType, TradeDirection, TradeOutcome, TradeStatus};
use crate::error::CoreError;
use crate::time::{parse_trade_time, serde_trade_time, serde_trade_time_opt};
use crate::valuation;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const MAX_SYMBOL_LEN: usize = 20;
const MAX_SETUP_LEN: usize = 100;

/// A single journaled trade.
///
/// Values of this type are always well-formed: the symbol is normalized, prices
/// and quantity are positive, and derived fields are filled in where they can
/// be. Build one from a raw row with `Trade::try_from(record)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    pub market: MarketType,
    pub direction: TradeDirection,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub quantity: Decimal,
    pub stop_loss: Option<Decimal>,
    pub take_profit: Option<Decimal>,
    pub status: TradeStatus,
    /// Signed realized P&L. Only meaningful for closed trades.
    pub profit_loss: Option<Decimal>,
    pub profit_loss_percent: Option<Decimal>,
    pub risk_reward: Option<Decimal>,
    pub setup: Option<String>,
    #[serde(with = "serde_trade_time")]
    pub trade_date: NaiveDateTime,
    #[serde(with = "serde_trade_time_opt", default)]
    pub exit_date: Option<NaiveDateTime>,
}

impl Trade {
    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    /// The moment the trade left the book: the exit date, or the entry date when
    /// no exit was recorded.
    pub fn closed_at(&self) -> NaiveDateTime {
        self.exit_date.unwrap_or(self.trade_date)
    }

    /// Realized P&L, with a missing value counted as zero.
    pub fn realized_pnl(&self) -> Decimal {
        self.profit_loss.unwrap_or(Decimal::ZERO)
    }

    pub fn outcome(&self) -> TradeOutcome {
        let pnl = self.realized_pnl();
        if pnl > Decimal::ZERO {
            TradeOutcome::Win
        } else if pnl < Decimal::ZERO {
            TradeOutcome::Loss
        } else {
            TradeOutcome::BreakEven
        }
    }

    /// Holding time in fractional days. `None` without an exit date.
    pub fn duration_days(&self) -> Option<Decimal> {
        let exit = self.exit_date?;
        let seconds = (exit - self.trade_date).num_seconds();
        Some(Decimal::from(seconds) / Decimal::from(86_400))
    }

    /// The strategy label, if one was given and is not blank.
    pub fn setup_label(&self) -> Option<&str> {
        self.setup.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// A trade row as it arrives from storage or user input, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: String,
    pub symbol: String,
    #[serde(alias = "market")]
    pub market_type: Option<MarketType>,
    pub direction: Option<TradeDirection>,
    pub entry_price: Option<Decimal>,
    #[serde(default)]
    pub exit_price: Option<Decimal>,
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub stop_loss: Option<Decimal>,
    #[serde(default)]
    pub take_profit: Option<Decimal>,
    pub status: Option<TradeStatus>,
    #[serde(default)]
    pub profit_loss: Option<Decimal>,
    #[serde(default)]
    pub profit_loss_percent: Option<Decimal>,
    #[serde(default)]
    pub risk_reward: Option<Decimal>,
    #[serde(default)]
    pub setup: Option<String>,
    pub trade_date: String,
    #[serde(default)]
    pub exit_date: Option<String>,
}

impl TryFrom<TradeRecord> for Trade {
    type Error = CoreError;

    fn try_from(record: TradeRecord) -> Result<Self, Self::Error> {
        let symbol = record.symbol.trim().to_uppercase();
        if symbol.is_empty() || symbol.chars().count() > MAX_SYMBOL_LEN {
            return Err(invalid("symbol", format!("'{}' must be 1-{MAX_SYMBOL_LEN} characters", record.symbol)));
        }

        let market = record.market_type.ok_or_else(|| missing("market_type"))?;
        let direction = record.direction.ok_or_else(|| missing("direction"))?;
        let status = record.status.ok_or_else(|| missing("status"))?;
        let entry_price = positive("entry_price", record.entry_price.ok_or_else(|| missing("entry_price"))?)?;
        let quantity = positive("quantity", record.quantity.ok_or_else(|| missing("quantity"))?)?;
        let exit_price = record.exit_price.map(|p| positive("exit_price", p)).transpose()?;
        let stop_loss = record.stop_loss.map(|p| positive("stop_loss", p)).transpose()?;
        let take_profit = record.take_profit.map(|p| positive("take_profit", p)).transpose()?;

        let setup = record.setup.filter(|s| !s.trim().is_empty());
        if let Some(setup) = &setup {
            if setup.chars().count() > MAX_SETUP_LEN {
                return Err(invalid("setup", format!("must be at most {MAX_SETUP_LEN} characters")));
            }
        }

        let trade_date = parse_trade_time(&record.trade_date)?;
        let exit_date = match record.exit_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_trade_time(raw)?),
        };

        let profit_loss = match (record.profit_loss, status, exit_price) {
            (Some(pnl), _, _) => Some(pnl),
            (None, TradeStatus::Closed, Some(exit)) => Some(
                valuation::realized_pnl(direction, entry_price, exit, quantity)
                    .ok_or_else(|| invalid("quantity", "position value overflows".to_string()))?,
            ),
            (None, TradeStatus::Closed, None) => {
                tracing::warn!(id = %record.id, "Closed trade has neither P&L nor exit price; it will count as breakeven.");
                None
            }
            (None, _, _) => None,
        };
        let profit_loss_percent = match (record.profit_loss_percent, profit_loss) {
            (Some(percent), _) => Some(percent),
            (None, Some(pnl)) => Some(
                valuation::pnl_percent(pnl, entry_price, quantity)
                    .ok_or_else(|| invalid("quantity", "position value overflows".to_string()))?,
            ),
            (None, None) => None,
        };
        let risk_reward = record
            .risk_reward
            .or_else(|| valuation::risk_reward(entry_price, stop_loss, take_profit));

        Ok(Trade {
            id: record.id,
            symbol,
            market,
            direction,
            entry_price,
            exit_price,
            quantity,
            stop_loss,
            take_profit,
            status,
            profit_loss,
            profit_loss_percent,
            risk_reward,
            setup,
            trade_date,
            exit_date,
        })
    }
}

fn invalid(field: &str, reason: String) -> CoreError {
    CoreError::InvalidInput(field.to_string(), reason)
}

fn missing(field: &str) -> CoreError {
    invalid(field, "is required".to_string())
}

fn positive(field: &str, value: Decimal) -> Result<Decimal, CoreError> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record() -> TradeRecord {
        TradeRecord {
            id: "t-1".to_string(),
            symbol: " aapl ".to_string(),
            market_type: Some(MarketType::Stock),
            direction: Some(TradeDirection::Long),
            entry_price: Some(dec!(100)),
            exit_price: Some(dec!(110)),
            quantity: Some(dec!(5)),
            stop_loss: Some(dec!(95)),
            take_profit: Some(dec!(120)),
            status: Some(TradeStatus::Closed),
            trade_date: "2024-03-01T10:00:00".to_string(),
            exit_date: Some("2024-03-03T10:00:00".to_string()),
            ..TradeRecord::default()
        }
    }

    #[test]
    fn closed_record_derives_pnl_and_ratios() {
        let trade = Trade::try_from(record()).unwrap();
        assert_eq!(trade.symbol, "AAPL");
        assert_eq!(trade.profit_loss, Some(dec!(50)));
        assert_eq!(trade.profit_loss_percent, Some(dec!(10)));
        assert_eq!(trade.risk_reward, Some(dec!(4)));
        assert_eq!(trade.duration_days(), Some(dec!(2)));
        assert_eq!(trade.outcome(), TradeOutcome::Win);
    }

    #[test]
    fn stored_pnl_wins_over_derivation() {
        let mut raw = record();
        raw.profit_loss = Some(dec!(0));
        let trade = Trade::try_from(raw).unwrap();
        assert_eq!(trade.profit_loss, Some(dec!(0)));
        assert_eq!(trade.outcome(), TradeOutcome::BreakEven);
    }

    #[test]
    fn open_record_has_no_pnl() {
        let mut raw = record();
        raw.status = Some(TradeStatus::Open);
        raw.exit_price = None;
        raw.exit_date = Some(String::new());
        let trade = Trade::try_from(raw).unwrap();
        assert_eq!(trade.profit_loss, None);
        assert_eq!(trade.exit_date, None);
        assert_eq!(trade.closed_at(), trade.trade_date);
    }

    #[test]
    fn rejects_non_positive_quantity_and_long_symbols() {
        let mut raw = record();
        raw.quantity = Some(dec!(0));
        assert!(matches!(Trade::try_from(raw), Err(CoreError::InvalidInput(field, _)) if field == "quantity"));

        let mut raw = record();
        raw.symbol = "X".repeat(21);
        assert!(matches!(Trade::try_from(raw), Err(CoreError::InvalidInput(field, _)) if field == "symbol"));
    }

    #[test]
    fn rejects_position_value_that_overflows() {
        let mut raw = record();
        raw.entry_price = Some(dec!(100000000000000000000));
        raw.exit_price = Some(dec!(200000000000000000000));
        raw.quantity = Some(dec!(10000000000));
        assert!(matches!(Trade::try_from(raw), Err(CoreError::InvalidInput(field, _)) if field == "quantity"));

        // A supplied P&L still needs a percent derived from the entry value.
        let mut raw = record();
        raw.entry_price = Some(dec!(100000000000000000000));
        raw.quantity = Some(dec!(10000000000));
        raw.profit_loss = Some(dec!(5));
        assert!(matches!(Trade::try_from(raw), Err(CoreError::InvalidInput(field, _)) if field == "quantity"));
    }

    #[test]
    fn blank_setup_is_dropped() {
        let mut raw = record();
        raw.setup = Some("   ".to_string());
        let trade = Trade::try_from(raw).unwrap();
        assert_eq!(trade.setup, None);
        assert_eq!(trade.setup_label(), None);
    }

    #[test]
    fn record_deserializes_from_store_row() {
        let json = r#"{
            "id": "abc",
            "symbol": "btcusdt",
            "market_type": "crypto",
            "direction": "short",
            "entry_price": 42000.5,
            "quantity": "0.5",
            "status": "closed",
            "profit_loss": -125.25,
            "trade_date": "2024-01-05",
            "exit_date": null,
            "notes": "ignored"
        }"#;
        let raw: TradeRecord = serde_json::from_str(json).unwrap();
        let trade = Trade::try_from(raw).unwrap();
        assert_eq!(trade.market, MarketType::Crypto);
        assert_eq!(trade.profit_loss, Some(dec!(-125.25)));
        assert_eq!(trade.outcome(), TradeOutcome::Loss);
        assert_eq!(trade.duration_days(), None);
    }
}
