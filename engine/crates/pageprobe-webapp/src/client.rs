//! HTTP client used for the page fetch and for probe requests

use crate::headers::{normalize_headers, HeaderMap};
use crate::ScanConfig;
use reqwest::{Client, Url};
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Connect(String),

    #[error("timeout of {0}ms exceeded")]
    Timeout(u128),

    #[error("Request failed with status code {0}")]
    Status(u16),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

/// HTTP response wrapper
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Response headers, names lowercased
    pub headers: HeaderMap,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get header value (names are stored lowercased)
    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }

    /// Reject non-2xx responses
    pub fn error_for_status(self) -> Result<Self, ClientError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Status(self.status))
        }
    }
}

/// Shared HTTP client. One connection pool per scanner; each request sets its own timeout.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: &ScanConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self { client })
    }

    /// Perform a GET request. Any status code is returned as a response;
    /// only transport failures are errors.
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, ClientError> {
        let url = Url::parse(url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))?;
        self.get_url(url, timeout).await
    }

    /// Perform a GET request against an already parsed URL
    pub async fn get_url(&self, url: Url, timeout: Duration) -> Result<HttpResponse, ClientError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout(timeout.as_millis())
                } else if e.is_connect() {
                    ClientError::Connect(error_chain(&e))
                } else {
                    ClientError::Request(e)
                }
            })?;

        let status = response.status().as_u16();
        let headers = normalize_headers(
            response
                .headers()
                .iter()
                .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v))),
        );

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(timeout.as_millis())
            } else {
                ClientError::Request(e)
            }
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Render an error with its sources, e.g. the refused address and OS error
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
