//! Scan requests, reports and report helpers

use crate::finding::{Issue, MISSING_HEADER_PREFIX};
use crate::severity::RiskLevel;
use serde::{Deserialize, Deserializer, Serialize};

/// Depth of a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    /// Passive checks on the fetched page only
    #[default]
    Quick,
    /// Passive checks plus XSS and SQL injection probing
    Full,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Quick => "quick",
            ScanType::Full => "full",
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, ScanType::Full)
    }
}

impl std::fmt::Display for ScanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Only an exact "full" enables probing; anything else is a quick scan.
impl<'de> Deserialize<'de> for ScanType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some("full") => ScanType::Full,
            _ => ScanType::Quick,
        })
    }
}

/// Overall outcome of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanStatus {
    Safe,
    Vulnerable,
}

/// Incoming scan request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    /// Absolute URL of the page to scan
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub scan_type: ScanType,
}

impl ScanRequest {
    pub fn new(url: impl Into<String>, scan_type: ScanType) -> Self {
        Self {
            url: Some(url.into()),
            scan_type,
        }
    }

    /// The URL, if present and not blank
    pub fn target(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

/// Result of a single scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub url: String,
    pub status: ScanStatus,
    pub scan_type: ScanType,
    pub issues: Vec<Issue>,
}

impl ScanReport {
    /// Aggregate collected issues into a report.
    ///
    /// The status is derived before the placeholder is substituted, so a
    /// report with only the placeholder is always `Safe`.
    pub fn from_issues(url: impl Into<String>, scan_type: ScanType, issues: Vec<Issue>) -> Self {
        let status = if issues.is_empty() {
            ScanStatus::Safe
        } else {
            ScanStatus::Vulnerable
        };

        let issues = if issues.is_empty() {
            vec![Issue::no_vulnerabilities()]
        } else {
            issues
        };

        Self {
            url: url.into(),
            status,
            scan_type,
            issues,
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        self.status == ScanStatus::Vulnerable
    }

    /// Highest risk among the reported issues
    pub fn highest_risk(&self) -> RiskLevel {
        self.issues
            .iter()
            .map(|i| i.risk)
            .max()
            .unwrap_or_default()
    }

    /// Number of issues at exactly the given risk
    pub fn count_by_risk(&self, risk: RiskLevel) -> usize {
        self.issues.iter().filter(|i| i.risk == risk).count()
    }
}

/// Return the issues ordered high, medium, low, none.
///
/// The sort is stable: issues of equal risk keep their scan order.
pub fn sort_by_risk(issues: &[Issue]) -> Vec<Issue> {
    let mut sorted = issues.to_vec();
    sorted.sort_by(|a, b| b.risk.cmp(&a.risk));
    sorted
}

/// Find the missing-header issue for `header`, matching the name case-insensitively
pub fn find_header_issue<'a>(issues: &'a [Issue], header: &str) -> Option<&'a Issue> {
    let wanted = header.trim().to_lowercase();
    issues.iter().find(|issue| {
        issue
            .message
            .strip_prefix(MISSING_HEADER_PREFIX)
            .map(|name| name.to_lowercase() == wanted)
            .unwrap_or(false)
    })
}
