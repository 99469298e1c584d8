//! PageProbe Core - Foundation types and error handling
//!
//! This crate provides the core abstractions shared by the PageProbe crates:
//! - `Issue`: A single finding with a message and a risk level
//! - `RiskLevel`: Ordinal severity (`none < low < medium < high`)
//! - `ScanRequest` / `ScanReport`: The scan wire types
//! - `Error`: Input, fetch and ambient errors

pub mod error;
pub mod finding;
pub mod report;
pub mod severity;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use finding::{Issue, MISSING_HEADER_PREFIX, NO_VULNERABILITIES_MESSAGE};
pub use report::{find_header_issue, sort_by_risk, ScanReport, ScanRequest, ScanStatus, ScanType};
pub use severity::RiskLevel;
