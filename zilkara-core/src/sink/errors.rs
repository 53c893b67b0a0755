// sink/errors.rs

use thiserror::Error;
use zilkara_common::data::DataError;

/// Persistence failures. These are fatal for a run.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] ::redis::RedisError),
}

impl SinkError {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        SinkError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
