use crate::sink::SinkError;
use crate::source::SourceError;
use thiserror::Error;
use zilkara_common::data::DataError;

/// Service layer error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
