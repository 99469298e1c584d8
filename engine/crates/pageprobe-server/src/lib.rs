//! PageProbe Server - HTTP scan API
//!
//! Exposes [`pageprobe_webapp::WebScanner`] over `POST /scan` and wires the
//! shared configuration into the scanner.

pub mod server;

pub use server::{router, ApiError, ApiServer, AppState, ErrorBody, HealthResponse, ServerError};

use pageprobe_common::ScannerConfig;
use pageprobe_webapp::ScanConfig;

/// Translate the `[scanner]` config section into scanner settings
pub fn scan_config(config: &ScannerConfig) -> ScanConfig {
    ScanConfig::default()
        .with_fetch_timeout_seconds(config.fetch_timeout_seconds)
        .with_probe_timeout_seconds(config.probe_timeout_seconds)
        .with_user_agent(config.user_agent.clone())
        .with_insecure_domains(config.insecure_domains.clone())
}
