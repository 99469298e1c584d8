//! PageProbe Common - Shared utilities: logging and configuration
//!
//! This crate provides common functionality used across the PageProbe crates.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigBuilder, LoggingConfig, ScannerConfig, ServerConfig};
pub use logging::{init_logging, init_logging_with_config, LogConfig, LogFormat};
