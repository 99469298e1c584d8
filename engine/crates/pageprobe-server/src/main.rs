//! PageProbe - single-page web security probe
//!
//! Runs the scan API, or a single scan from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pageprobe_common::{init_logging_with_config, Config, LogConfig};
use pageprobe_core::{ScanRequest, ScanType};
use pageprobe_server::{scan_config, ApiServer};
use pageprobe_webapp::WebScanner;
use std::net::SocketAddr;
use tracing::info;

/// PageProbe web security probe
#[derive(Parser, Debug)]
#[command(name = "pageprobe")]
#[command(version)]
#[command(about = "Single-page web security probe", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "PAGEPROBE_CONFIG", default_value = "pageprobe.toml", global = true)]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the scan API (default)
    Serve {
        /// Listen address (overrides config)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Scan one URL and print the report as JSON
    Scan {
        url: String,

        /// Also run the XSS and SQL injection probes
        #[arg(long)]
        full: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load_or_default(&args.config)?.merge_env()?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }

    init_logging_with_config(LogConfig::try_from(&config.logging)?)?;

    info!("PageProbe starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let scanner = WebScanner::new(scan_config(&config.scanner))?;

    match args.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or(config.server.bind_addr);
            ApiServer::new(addr, scanner).serve().await?;
        }
        Command::Scan { url, full } => {
            let scan_type = if full { ScanType::Full } else { ScanType::Quick };
            let report = scanner.scan(&ScanRequest::new(url, scan_type)).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
