//! Issue definitions - findings reported by a single check

use crate::severity::RiskLevel;
use serde::{Deserialize, Serialize};

/// Message used for the placeholder issue of a clean scan
pub const NO_VULNERABILITIES_MESSAGE: &str = "No vulnerabilities found.";

/// Prefix of every missing-header issue message
pub const MISSING_HEADER_PREFIX: &str = "Missing security header: ";

/// A single finding with a human-readable message and a risk level
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    pub message: String,
    pub risk: RiskLevel,
}

impl Issue {
    pub fn new(message: impl Into<String>, risk: RiskLevel) -> Self {
        Self {
            message: message.into(),
            risk,
        }
    }

    pub fn high(message: impl Into<String>) -> Self {
        Self::new(message, RiskLevel::High)
    }

    pub fn medium(message: impl Into<String>) -> Self {
        Self::new(message, RiskLevel::Medium)
    }

    pub fn low(message: impl Into<String>) -> Self {
        Self::new(message, RiskLevel::Low)
    }

    /// Placeholder shown when a scan found nothing
    pub fn no_vulnerabilities() -> Self {
        Self::new(NO_VULNERABILITIES_MESSAGE, RiskLevel::None)
    }

    /// True for the clean-scan placeholder
    pub fn is_placeholder(&self) -> bool {
        self.risk == RiskLevel::None && self.message == NO_VULNERABILITIES_MESSAGE
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} risk)",
            self.message,
            self.risk.as_str().to_uppercase()
        )
    }
}
