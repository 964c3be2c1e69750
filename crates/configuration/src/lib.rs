use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, LoggingSettings, ReportSettings, StoreSettings};

/// Prefix for environment overrides, e.g. `TRADELOG_STORE__TRADES_PATH`.
pub const ENV_PREFIX: &str = "TRADELOG";

/// Loads the application configuration.
///
/// Reads `path` if it exists (a missing file is not an error; every section has
/// defaults), then applies `TRADELOG_`-prefixed environment variables on top,
/// deserializes into our strongly-typed `Config` struct and validates it.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(path = %path.display(), ?config, "Configuration loaded.");
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.report.recent_months == 0 {
        return Err(ConfigError::ValidationError(
            "report.recent_months must be greater than 0".to_string(),
        ));
    }
    if config.report.recent_trades == 0 {
        return Err(ConfigError::ValidationError(
            "report.recent_trades must be greater than 0".to_string(),
        ));
    }
    if config.store.trades_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "store.trades_path must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use trade_store::PeriodPreset;

    fn write_config(name: &str, body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{name}-{}.toml", std::process::id()));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config("/nonexistent/tradelog.toml").unwrap();
        assert_eq!(config.report.recent_months, 12);
        assert_eq!(config.report.recent_trades, 5);
        assert_eq!(config.report.default_preset, PeriodPreset::Last30Days);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let path = write_config(
            "tradelog-override",
            r#"
            [store]
            trades_path = "journal/trades.json"

            [report]
            recent_months = 6
            default_preset = "ytd"
            "#,
        );

        let config = load_config(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.store.trades_path, std::path::PathBuf::from("journal/trades.json"));
        assert_eq!(config.report.recent_months, 6);
        assert_eq!(config.report.recent_trades, 5);
        assert_eq!(config.report.default_preset, PeriodPreset::YearToDate);
    }

    #[test]
    fn zero_month_window_is_rejected() {
        let path = write_config("tradelog-invalid", "[report]\nrecent_months = 0\n");

        let result = load_config(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
