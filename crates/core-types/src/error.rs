use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Unrecognized timestamp '{0}': expected YYYY-MM-DD with an optional time of day")]
    InvalidTimestamp(String),
}
