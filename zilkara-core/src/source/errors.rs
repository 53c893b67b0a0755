// source/errors.rs

use thiserror::Error;

/// Why a market-data fetch produced no data.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Data parsing error: {0}")]
    Parse(String),

    #[error("Client setup error: {0}")]
    Client(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout(err.to_string())
        } else if err.is_builder() {
            SourceError::Client(err.to_string())
        } else {
            SourceError::Network(err.to_string())
        }
    }
}
