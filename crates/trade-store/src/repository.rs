use crate::error::StoreError;
use crate::period::AnalyticsPeriod;
use core_types::{Trade, TradeRecord};
use std::fs;
use std::path::Path;

/// Read access to the trade journal.
pub trait TradeStore {
    /// Every trade in the journal, in storage order.
    fn all_trades(&self) -> Result<Vec<Trade>, StoreError>;

    /// Trades entered within `period`, oldest entry first.
    fn trades_in_period(&self, period: &AnalyticsPeriod) -> Result<Vec<Trade>, StoreError> {
        let mut trades: Vec<Trade> = self
            .all_trades()?
            .into_iter()
            .filter(|trade| period.contains(trade))
            .collect();
        trades.sort_by_key(|trade| trade.trade_date);
        Ok(trades)
    }
}

/// A `TradeStore` backed by a JSON file holding an array of trade rows.
///
/// Rows are validated once, when the store is opened; a single bad row fails
/// the whole load and names the offending row.
#[derive(Debug, Clone)]
pub struct JsonTradeStore {
    trades: Vec<Trade>,
}

impl JsonTradeStore {
    /// Reads and validates the journal at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), trades = store.trades.len(), "Loaded trade journal.");
        Ok(store)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, StoreError> {
        let records: Vec<TradeRecord> = serde_json::from_str(raw)?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<TradeRecord>) -> Result<Self, StoreError> {
        let trades = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let id = record.id.clone();
                Trade::try_from(record).map_err(|source| StoreError::InvalidRow { index, id, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { trades })
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

impl TradeStore for JsonTradeStore {
    fn all_trades(&self) -> Result<Vec<Trade>, StoreError> {
        Ok(self.trades.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::TradeStatus;
    use rust_decimal_macros::dec;

    const JOURNAL: &str = r#"[
        {"id": "a", "symbol": "aapl", "market_type": "stock", "direction": "long",
         "entry_price": 100, "exit_price": 104, "quantity": 10, "status": "closed",
         "trade_date": "2024-03-05T14:00:00+00:00", "exit_date": "2024-03-06T15:00:00+00:00"},
        {"id": "b", "symbol": "ETHUSDT", "market_type": "crypto", "direction": "short",
         "entry_price": "3500", "quantity": "0.2", "status": "open",
         "stop_loss": 3600, "take_profit": 3200, "trade_date": "2024-03-01"},
        {"id": "c", "symbol": "EURUSD", "market_type": "forex", "direction": "long",
         "entry_price": 1.08, "quantity": 1000, "status": "closed", "profit_loss": -4.5,
         "trade_date": "2024-02-20", "exit_date": null}
    ]"#;

    fn day(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn rows_are_validated_and_enriched() {
        let store = JsonTradeStore::from_json_str(JOURNAL).unwrap();
        let trades = store.all_trades().unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(trades[0].symbol, "AAPL");
        assert_eq!(trades[0].profit_loss, Some(dec!(40)));
        assert_eq!(trades[1].status, TradeStatus::Open);
        assert_eq!(trades[1].risk_reward, Some(dec!(3)));
        assert_eq!(trades[2].profit_loss, Some(dec!(-4.5)));
    }

    #[test]
    fn period_query_is_inclusive_and_ordered_by_entry() {
        let store = JsonTradeStore::from_json_str(JOURNAL).unwrap();
        let period = AnalyticsPeriod::new(day("2024-03-01"), day("2024-03-05")).unwrap();

        let ids: Vec<String> = store
            .trades_in_period(&period)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn bad_row_is_reported_with_its_position() {
        let raw = r#"[
            {"id": "ok", "symbol": "AAPL", "market_type": "stock", "direction": "long",
             "entry_price": 1, "quantity": 1, "status": "open", "trade_date": "2024-01-01"},
            {"id": "neg", "symbol": "AAPL", "market_type": "stock", "direction": "long",
             "entry_price": -1, "quantity": 1, "status": "open", "trade_date": "2024-01-01"}
        ]"#;

        match JsonTradeStore::from_json_str(raw) {
            Err(StoreError::InvalidRow { index, id, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(id, "neg");
            }
            other => panic!("expected an invalid row error, got {other:?}"),
        }
    }

    #[test]
    fn overflowing_position_is_an_invalid_row() {
        let raw = r#"[
            {"id": "big", "symbol": "AAPL", "market_type": "stock", "direction": "long",
             "entry_price": "100000000000000000000", "exit_price": "200000000000000000000",
             "quantity": "10000000000", "status": "closed", "trade_date": "2024-01-01"}
        ]"#;

        match JsonTradeStore::from_json_str(raw) {
            Err(StoreError::InvalidRow { index, id, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(id, "big");
            }
            other => panic!("expected an invalid row error, got {other:?}"),
        }
    }

    #[test]
    fn open_reads_from_disk() {
        let path = std::env::temp_dir().join(format!("trade-store-{}.json", std::process::id()));
        fs::write(&path, JOURNAL).unwrap();

        let store = JsonTradeStore::open(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(store.len(), 3);

        let missing = JsonTradeStore::open(&path).unwrap_err();
        assert!(matches!(missing, StoreError::Io { .. }));
    }
}
