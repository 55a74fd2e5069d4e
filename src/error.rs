use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LcsError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Render Error: {0}")]
    Render(String),

    #[error("Brute force exceeded its deadline after {elapsed:?} ({candidates} candidates checked)")]
    DeadlineExceeded { elapsed: Duration, candidates: u64 },

    #[error("Brute force aborted: {0}")]
    OracleAborted(String),
}

pub type LcsResult<T> = Result<T, LcsError>;
