use thiserror::Error;

/// Common error type for WorldMetrics components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status} for {endpoint}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using WorldMetrics' Error.
pub type Result<T> = std::result::Result<T, Error>;
