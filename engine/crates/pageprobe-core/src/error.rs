//! Error types for PageProbe

use thiserror::Error;

/// Result type alias using PageProbe Error
pub type Result<T> = std::result::Result<T, Error>;

/// PageProbe error types
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    #[error("URL is required.")]
    UrlRequired,

    // === Scanning Errors ===
    #[error("Failed to scan the URL. {0}")]
    FetchFailed(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    // === Generic ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the caller sent a bad request
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::UrlRequired)
    }

    /// HTTP status code used when surfacing this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::UrlRequired => 400,
            // An unparseable URL is reported as a failed fetch
            Error::FetchFailed(_) => 500,
            Error::Configuration(_) | Error::Internal(_) => 500,
        }
    }

    /// Get an error code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Error::UrlRequired => "URL_REQUIRED",
            Error::FetchFailed(_) => "FETCH_FAILED",
            Error::Configuration(_) => "CONFIG_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
