//! Shared value types for the trading journal: the validated `Trade`, the raw
//! `TradeRecord` it is built from, and the arithmetic that derives P&L and
//! risk/reward from prices.

pub mod enums;
pub mod error;
pub mod structs;
pub mod time;
pub mod valuation;

// Re-export the core types to provide a clean public API.
pub use enums::{MarketType, TradeDirection, TradeOutcome, TradeStatus};
pub use error::CoreError;
pub use structs::{Trade, TradeRecord};
pub use time::parse_trade_time;
