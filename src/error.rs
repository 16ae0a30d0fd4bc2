//! Error types for the assay crate

use thiserror::Error;

/// Result type for assay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for assay operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Authentication or credential configuration error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Web crawling error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Content processing error
    #[error("Process error: {0}")]
    Process(String),

    /// Answer evaluation error
    #[error("Evaluation error: {0}")]
    Evaluate(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
