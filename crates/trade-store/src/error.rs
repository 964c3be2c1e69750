use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read trade journal at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("An error occurred during JSON deserialization: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Trade row {index} (id '{id}') is invalid: {source}")]
    InvalidRow {
        index: usize,
        id: String,
        #[source]
        source: core_types::CoreError,
    },

    #[error("Invalid period: start {start} is after end {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("Unknown period preset '{0}'")]
    UnknownPreset(String),
}
