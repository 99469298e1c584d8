//! Scan checks: passive checks on the fetched page, active probes on demand

use crate::client::{HttpClient, HttpResponse};
use crate::headers::SecurityHeaders;
use crate::links::check_insecure_links;
use crate::probes::{probe_sql_injection, probe_xss, ProbeOutcome};
use crate::ScanConfig;
use pageprobe_core::Issue;
use tracing::debug;
use url::Url;

/// Flag targets requested over plain HTTP
pub fn check_protocol(target: &str) -> Option<Issue> {
    target
        .starts_with("http://")
        .then(|| Issue::high("Using insecure HTTP protocol."))
}

/// Flag targets whose hostname is on the insecure domain list
pub fn check_domain_blacklist(url: &Url, insecure_domains: &[String]) -> Option<Issue> {
    let host = url.host_str()?.to_lowercase();
    insecure_domains
        .iter()
        .any(|d| d.eq_ignore_ascii_case(&host))
        .then(|| Issue::high("Domain is listed as insecure."))
}

/// Run passive checks on the fetched page (no additional requests)
pub fn run_passive_checks(
    target: &str,
    url: &Url,
    response: &HttpResponse,
    config: &ScanConfig,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    issues.extend(check_protocol(target));
    issues.extend(check_domain_blacklist(url, &config.insecure_domains));
    issues.extend(SecurityHeaders::check(&response.headers));
    issues.extend(check_insecure_links(&response.body, target));

    issues
}

/// Run active probes (sends additional requests). XSS first, then SQL injection.
pub async fn run_active_checks(target: &str, client: &HttpClient, config: &ScanConfig) -> Vec<Issue> {
    let timeout = config.probe_timeout();
    let mut issues = Vec::new();

    issues.extend(collect("xss", probe_xss(client, target, timeout).await));
    issues.extend(collect("sqli", probe_sql_injection(client, target, timeout).await));

    issues
}

fn collect(probe: &str, outcome: ProbeOutcome) -> Vec<Issue> {
    match outcome {
        ProbeOutcome::Completed(issues) => {
            debug!(probe, found = issues.len(), "Probe completed");
            issues
        }
        ProbeOutcome::Inconclusive { issues, reason } => {
            debug!(probe, found = issues.len(), %reason, "Probe inconclusive");
            issues
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::normalize_headers;
    use pageprobe_core::RiskLevel;

    fn page(headers: &[(&str, &str)], body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: normalize_headers(headers.iter().copied()),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_protocol_check() {
        assert_eq!(
            check_protocol("http://example.com"),
            Some(Issue::high("Using insecure HTTP protocol."))
        );
        assert!(check_protocol("https://example.com").is_none());
    }

    #[test]
    fn test_domain_blacklist_exact_match() {
        let domains = vec!["testphp.vulnweb.com".to_string()];
        let listed = Url::parse("http://TestPHP.vulnweb.com/index.php").unwrap();
        let sub = Url::parse("http://www.testphp.vulnweb.com/").unwrap();

        assert!(check_domain_blacklist(&listed, &domains).is_some());
        assert!(check_domain_blacklist(&sub, &domains).is_none());
    }

    #[test]
    fn test_passive_check_order() {
        let config = ScanConfig::default();
        let target = "http://testphp.vulnweb.com/";
        let url = Url::parse(target).unwrap();
        let response = page(
            &[
                ("Content-Security-Policy", "default-src 'self'"),
                ("Strict-Transport-Security", "max-age=1"),
                ("X-Frame-Options", "DENY"),
                ("X-Content-Type-Options", "nosniff"),
                ("Referrer-Policy", "no-referrer"),
            ],
            r#"<a href="http://plain.test/">x</a>"#,
        );

        let issues = run_passive_checks(target, &url, &response, &config);
        let messages: Vec<_> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Using insecure HTTP protocol.",
                "Domain is listed as insecure.",
                "Missing security header: permissions-policy",
                "Page contains insecure link: http://plain.test/",
            ]
        );
        assert_eq!(issues[2].risk, RiskLevel::Low);
        assert_eq!(issues[3].risk, RiskLevel::Medium);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logged_at(level: tracing::Level, outcome: ProbeOutcome) -> (Vec<Issue>, String) {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let issues = tracing::subscriber::with_default(subscriber, || collect("xss", outcome));
        let text = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        (issues, text)
    }

    #[test]
    fn test_inconclusive_probe_logged_at_debug_only() {
        let outcome = || ProbeOutcome::Inconclusive {
            issues: vec![Issue::high("Reflected XSS detected in parameter: a")],
            reason: "timeout of 5000ms exceeded".to_string(),
        };

        let (issues, text) = logged_at(tracing::Level::INFO, outcome());
        assert_eq!(issues.len(), 1);
        assert!(text.is_empty());

        let (_, text) = logged_at(tracing::Level::DEBUG, outcome());
        assert!(text.contains("Probe inconclusive"));
        assert!(text.contains("timeout of 5000ms exceeded"));
    }
}
