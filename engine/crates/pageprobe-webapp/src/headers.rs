//! Security header analysis

use pageprobe_core::{Issue, RiskLevel, MISSING_HEADER_PREFIX};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response headers keyed by lowercased name
pub type HeaderMap = BTreeMap<String, String>;

/// Headers every page is expected to send, in reporting order
pub const REQUIRED_HEADERS: &[(&str, RiskLevel)] = &[
    ("content-security-policy", RiskLevel::High),
    ("strict-transport-security", RiskLevel::High),
    ("x-frame-options", RiskLevel::Medium),
    ("x-content-type-options", RiskLevel::Medium),
    ("referrer-policy", RiskLevel::Low),
    ("permissions-policy", RiskLevel::Low),
];

/// Build a [`HeaderMap`] from raw header pairs.
///
/// Names are lowercased. Repeated headers are joined with `", "`.
pub fn normalize_headers<'a, I>(headers: I) -> HeaderMap
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        map.entry(name.to_lowercase())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    map
}

/// Security header analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderAnalysis {
    /// One entry per required header, in table order
    pub headers: Vec<HeaderStatus>,
}

/// Status of a single required header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderStatus {
    pub name: String,
    pub value: Option<String>,
    pub status: HeaderCheckStatus,
    /// Risk reported when the header is missing
    pub risk: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderCheckStatus {
    Present,
    /// Absent, or present with an empty value
    Missing,
}

/// Security headers analyzer
pub struct SecurityHeaders;

impl SecurityHeaders {
    /// Analyze a normalized header map against [`REQUIRED_HEADERS`]
    pub fn analyze(headers: &HeaderMap) -> HeaderAnalysis {
        let headers = REQUIRED_HEADERS
            .iter()
            .map(|&(name, risk)| {
                let value = headers.get(name).filter(|v| !v.trim().is_empty()).cloned();
                let status = if value.is_some() {
                    HeaderCheckStatus::Present
                } else {
                    HeaderCheckStatus::Missing
                };
                HeaderStatus {
                    name: name.to_string(),
                    value,
                    status,
                    risk,
                }
            })
            .collect();

        HeaderAnalysis { headers }
    }

    /// One issue per missing required header
    pub fn check(headers: &HeaderMap) -> Vec<Issue> {
        Self::analyze(headers).to_issues()
    }
}

impl HeaderAnalysis {
    /// Convert analysis to issues
    pub fn to_issues(&self) -> Vec<Issue> {
        self.headers
            .iter()
            .filter(|h| h.status == HeaderCheckStatus::Missing)
            .map(|h| Issue::new(format!("{}{}", MISSING_HEADER_PREFIX, h.name), h.risk))
            .collect()
    }

    pub fn missing_count(&self) -> usize {
        self.headers
            .iter()
            .filter(|h| h.status == HeaderCheckStatus::Missing)
            .count()
    }
}
