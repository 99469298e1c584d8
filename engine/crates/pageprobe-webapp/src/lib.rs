//! PageProbe WebApp - Single-page web security probing
//!
//! This crate provides the scan engine:
//! - HTTP client for the page fetch and probe requests
//! - Security header checklist
//! - Insecure (`http://`) link detection
//! - Reflected XSS and error-based SQL injection probes on query parameters
//!
//! # Example
//!
//! ```no_run
//! use pageprobe_core::{ScanRequest, ScanType};
//! use pageprobe_webapp::{ScanConfig, WebScanner};
//!
//! #[tokio::main]
//! async fn main() {
//!     let scanner = WebScanner::new(ScanConfig::default()).unwrap();
//!     let request = ScanRequest::new("https://example.com/?q=1", ScanType::Full);
//!     let report = scanner.scan(&request).await.unwrap();
//!
//!     for issue in report.issues {
//!         println!("{}", issue);
//!     }
//! }
//! ```

pub mod checks;
pub mod client;
pub mod headers;
pub mod links;
pub mod probes;

pub use client::{ClientError, HttpClient, HttpResponse};
pub use headers::{HeaderAnalysis, HeaderMap, SecurityHeaders};
pub use probes::ProbeOutcome;

use pageprobe_core::{Error, Result, ScanReport, ScanRequest, ScanType};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Web scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Timeout for the initial page fetch in seconds
    pub fetch_timeout_seconds: u64,
    /// Timeout for each probe request in seconds
    pub probe_timeout_seconds: u64,
    pub user_agent: String,
    pub max_redirects: usize,
    /// Hostnames reported as insecure (exact match)
    pub insecure_domains: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_seconds: 10,
            probe_timeout_seconds: 5,
            user_agent: format!("PageProbe/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
            insecure_domains: vec![String::from("testphp.vulnweb.com")],
        }
    }
}

impl ScanConfig {
    pub fn with_fetch_timeout_seconds(mut self, timeout: u64) -> Self {
        self.fetch_timeout_seconds = timeout;
        self
    }

    pub fn with_probe_timeout_seconds(mut self, timeout: u64) -> Self {
        self.probe_timeout_seconds = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_insecure_domains(mut self, domains: Vec<String>) -> Self {
        self.insecure_domains = domains.into_iter().map(|d| d.to_lowercase()).collect();
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds)
    }
}

/// Main web scanner. Holds no per-scan state; one instance serves concurrent scans.
#[derive(Clone)]
pub struct WebScanner {
    config: ScanConfig,
    client: HttpClient,
}

impl WebScanner {
    /// Create a new web scanner with the given configuration
    pub fn new(config: ScanConfig) -> Result<Self> {
        let client = HttpClient::new(&config).map_err(|e| Error::Internal(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Run a scan request.
    ///
    /// Fails with [`Error::UrlRequired`] when the request has no URL and with
    /// [`Error::FetchFailed`] when the page cannot be fetched. Probe failures
    /// never fail the scan.
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanReport> {
        let target = request.target().ok_or(Error::UrlRequired)?;
        self.scan_url(target, request.scan_type).await
    }

    /// Scan a target URL
    pub async fn scan_url(&self, target: &str, scan_type: ScanType) -> Result<ScanReport> {
        info!("Starting {} scan of {}", scan_type, target);

        let url = Url::parse(target)
            .map_err(|e| Error::FetchFailed(format!("Invalid URL: {}", e)))?;

        let response = self
            .client
            .get_url(url.clone(), self.config.fetch_timeout())
            .await
            .and_then(HttpResponse::error_for_status)
            .map_err(|e| {
                warn!("Fetch of {} failed: {}", target, e);
                Error::FetchFailed(e.to_string())
            })?;

        let mut issues = checks::run_passive_checks(target, &url, &response, &self.config);

        if scan_type.is_full() {
            issues.extend(checks::run_active_checks(target, &self.client, &self.config).await);
        }

        let report = ScanReport::from_issues(target, scan_type, issues);

        info!(
            "Scan of {} complete: {:?}, {} issues",
            target,
            report.status,
            report.issues.len()
        );

        Ok(report)
    }
}
