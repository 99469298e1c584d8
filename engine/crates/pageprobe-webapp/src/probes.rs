//! Active probes: reflected XSS and error-based SQL injection via query parameters
//!
//! Each probe attempt rebuilds the query from the original pairs, so one
//! parameter carries the payload and every other parameter keeps its
//! original value.

use crate::client::{HttpClient, HttpResponse};
use pageprobe_core::Issue;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Script payload that must come back verbatim to count as reflected
pub const XSS_PAYLOAD: &str = "<script>alert(1)</script>";

/// Parameter added when the target URL has no query parameters
pub const XSS_SYNTHETIC_PARAM: &str = "xss_test";

pub const SQLI_PAYLOADS: &[&str] = &["'", "\"", "' OR '1'='1", "\" OR \"1\"=\"1"];

/// Lowercase database error fragments
pub const SQL_ERROR_SIGNATURES: &[&str] = &[
    "you have an error in your sql syntax",
    "warning: mysql",
    "unclosed quotation mark after the character string",
    "quoted string not properly terminated",
    "syntax error",
];

pub const SQLI_SYNTHETIC_PARAM: &str = "sqli_test";

/// Result of a probe that may fail to reach its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Every planned request was answered
    Completed(Vec<Issue>),
    /// Some requests could not be made; `issues` holds what was found anyway
    Inconclusive { issues: Vec<Issue>, reason: String },
}

impl ProbeOutcome {
    pub fn issues(&self) -> &[Issue] {
        match self {
            ProbeOutcome::Completed(issues) => issues,
            ProbeOutcome::Inconclusive { issues, .. } => issues,
        }
    }

    pub fn into_issues(self) -> Vec<Issue> {
        match self {
            ProbeOutcome::Completed(issues) => issues,
            ProbeOutcome::Inconclusive { issues, .. } => issues,
        }
    }

    pub fn is_conclusive(&self) -> bool {
        matches!(self, ProbeOutcome::Completed(_))
    }

    fn inconclusive(issues: Vec<Issue>, reason: impl Into<String>) -> Self {
        ProbeOutcome::Inconclusive {
            issues,
            reason: reason.into(),
        }
    }
}

/// A query parameter that receives a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionPoint {
    /// Parameter at `index` in the original query
    Existing { index: usize, name: String },
    /// Parameter appended because the URL had none
    Synthetic { name: &'static str },
}

impl InjectionPoint {
    pub fn name(&self) -> &str {
        match self {
            InjectionPoint::Existing { name, .. } => name,
            InjectionPoint::Synthetic { name } => name,
        }
    }
}

/// Existing query parameters in URL order, or the single synthetic one
pub fn injection_points(url: &Url, synthetic: &'static str) -> Vec<InjectionPoint> {
    let points: Vec<InjectionPoint> = url
        .query_pairs()
        .enumerate()
        .map(|(index, (name, _))| InjectionPoint::Existing {
            index,
            name: name.into_owned(),
        })
        .collect();

    if points.is_empty() {
        vec![InjectionPoint::Synthetic { name: synthetic }]
    } else {
        points
    }
}

/// Build a fresh URL with `payload` placed at `point`
pub fn build_probe_url(url: &Url, point: &InjectionPoint, payload: &str) -> Url {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    match point {
        InjectionPoint::Existing { index, .. } => {
            if let Some(pair) = pairs.get_mut(*index) {
                pair.1 = payload.to_string();
            }
        }
        InjectionPoint::Synthetic { name } => {
            pairs.push((name.to_string(), payload.to_string()));
        }
    }

    let mut probe = url.clone();
    probe.query_pairs_mut().clear().extend_pairs(pairs.iter());
    probe
}

/// Probe every query parameter for verbatim reflection of [`XSS_PAYLOAD`].
///
/// Only 2xx responses are inspected. The first failed request stops the probe.
pub async fn probe_xss(client: &HttpClient, target: &str, timeout: Duration) -> ProbeOutcome {
    let base = match Url::parse(target) {
        Ok(url) => url,
        Err(e) => return ProbeOutcome::inconclusive(Vec::new(), format!("Invalid URL: {}", e)),
    };

    let mut issues = Vec::new();

    for point in injection_points(&base, XSS_SYNTHETIC_PARAM) {
        let probe_url = build_probe_url(&base, &point, XSS_PAYLOAD);

        let response = match client
            .get_url(probe_url, timeout)
            .await
            .and_then(HttpResponse::error_for_status)
        {
            Ok(response) => response,
            Err(e) => {
                return ProbeOutcome::inconclusive(
                    issues,
                    format!("XSS probe of '{}' failed: {}", point.name(), e),
                );
            }
        };

        if response.body.contains(XSS_PAYLOAD) {
            debug!("XSS payload reflected via {}", point.name());
            issues.push(match &point {
                InjectionPoint::Existing { name, .. } => {
                    Issue::high(format!("Reflected XSS detected in parameter: {}", name))
                }
                InjectionPoint::Synthetic { .. } => {
                    Issue::high("Reflected XSS vulnerability detected.")
                }
            });
        }
    }

    ProbeOutcome::Completed(issues)
}

/// Probe every query parameter with each of [`SQLI_PAYLOADS`], looking for
/// [`SQL_ERROR_SIGNATURES`] in the lowercased body.
///
/// Every status code is inspected. A failed request is skipped and the
/// remaining combinations still run; each matching signature is its own issue.
pub async fn probe_sql_injection(
    client: &HttpClient,
    target: &str,
    timeout: Duration,
) -> ProbeOutcome {
    let base = match Url::parse(target) {
        Ok(url) => url,
        Err(e) => return ProbeOutcome::inconclusive(Vec::new(), format!("Invalid URL: {}", e)),
    };

    let mut issues = Vec::new();
    let mut attempts = 0usize;
    let mut failures = Vec::new();

    for point in injection_points(&base, SQLI_SYNTHETIC_PARAM) {
        for payload in SQLI_PAYLOADS {
            attempts += 1;
            let probe_url = build_probe_url(&base, &point, payload);

            let body = match client.get_url(probe_url, timeout).await {
                Ok(response) => response.body.to_lowercase(),
                Err(e) => {
                    debug!("SQL injection probe of '{}' failed: {}", point.name(), e);
                    failures.push(e.to_string());
                    continue;
                }
            };

            for signature in SQL_ERROR_SIGNATURES {
                if body.contains(signature) {
                    issues.push(sqli_issue(&point, payload));
                }
            }
        }
    }

    match failures.last() {
        None => ProbeOutcome::Completed(issues),
        Some(last) => ProbeOutcome::inconclusive(
            issues,
            format!(
                "{} of {} SQL injection probe requests failed (last: {})",
                failures.len(),
                attempts,
                last
            ),
        ),
    }
}

fn sqli_issue(point: &InjectionPoint, payload: &str) -> Issue {
    match point {
        InjectionPoint::Existing { name, .. } => Issue::high(format!(
            "Possible SQL Injection detected in parameter: {} with payload: {}",
            name, payload
        )),
        InjectionPoint::Synthetic { .. } => Issue::high(format!(
            "Possible SQL Injection detected with payload: {}",
            payload
        )),
    }
}
