use thiserror::Error;

/// All the ways a quotebox operation can fail
///
/// Each variant stays local to the operation that raised it; nothing
/// here is fatal to the process.
#[derive(Error, Debug)]
pub enum Error {
    /// User input rejected before touching the store
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Remote request failed: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<quotebox_cache::CacheError> for Error {
    fn from(err: quotebox_cache::CacheError) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<quotebox_api::ApiError> for Error {
    fn from(err: quotebox_api::ApiError) -> Self {
        Error::Remote(err.to_string())
    }
}
