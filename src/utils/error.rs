//! Error handling for the sentiment service.

use thiserror::Error;

/// Main error type for the sentiment service
#[derive(Debug, Error)]
pub enum Error {
    /// Pair code that is not six letters (e.g. "EURUS")
    #[error("Invalid pair: {0}")]
    InvalidPair(String),

    /// Currency code missing from the profile table
    #[error("Unsupported currency {code}. Supported: {supported}")]
    UnsupportedCurrency { code: String, supported: String },

    /// Request parameters that could not be decoded (e.g. a repeated `pair`)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Failure reported by the news retrieval collaborator
    #[error("Retrieval error: {0}")]
    RetrievalError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// Request errors
    #[error("Request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

impl Error {
    /// True for errors caused by caller input rather than by a failed analysis.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidPair(_) | Error::UnsupportedCurrency { .. } | Error::InvalidRequest(_)
        )
    }

    /// True for failures of the upstream news index (HTTP, timeout, bad payload).
    pub fn is_retrieval(&self) -> bool {
        matches!(self, Error::RetrievalError(_) | Error::ReqwestError(_))
    }
}

/// Result type for the sentiment service
pub type Result<T> = std::result::Result<T, Error>;

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

// Allow automatic conversion from anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}
