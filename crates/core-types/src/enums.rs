use serde::{Deserialize, Serialize};
use std::fmt;

/// The asset class a trade was placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    Stock,
    Crypto,
    Forex,
    Futures,
}

impl MarketType {
    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            MarketType::Stock => "Stocks",
            MarketType::Crypto => "Crypto",
            MarketType::Forex => "Forex",
            MarketType::Futures => "Futures",
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MarketType::Stock => "stock",
            MarketType::Crypto => "crypto",
            MarketType::Forex => "forex",
            MarketType::Futures => "futures",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
    Cancelled,
}

/// Classification of a closed trade by the sign of its realized P&L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeOutcome {
    Win,
    Loss,
    BreakEven,
}
