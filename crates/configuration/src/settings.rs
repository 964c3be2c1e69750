use serde::Deserialize;
use std::path::PathBuf;
use trade_store::PeriodPreset;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreSettings,
    pub report: ReportSettings,
    pub logging: LoggingSettings,
}

/// Where the trade journal lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the JSON journal file.
    pub trades_path: PathBuf,
}

/// Presentation knobs for the period report and the dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// How many months the monthly P&L table shows.
    pub recent_months: usize,
    /// How many trades the dashboard lists as recent.
    pub recent_trades: usize,
    /// Period used by `analytics` when no range is given on the command line.
    pub default_preset: PeriodPreset,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            trades_path: PathBuf::from("trades.json"),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            recent_months: 12,
            recent_trades: 5,
            default_preset: PeriodPreset::Last30Days,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
