//! Insecure link detection in raw HTML

use pageprobe_core::Issue;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn http_href_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)href=["'](http://[^"']+)["']"#).expect("static href pattern is valid")
    })
}

/// Extract every plain-HTTP `href` target, in document order, duplicates included
pub fn extract_http_links(html: &str) -> Vec<&str> {
    http_href_pattern()
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Report each `http://` link on the page as a medium-risk issue.
///
/// `base_url` only labels the log line; links are not resolved against it.
pub fn check_insecure_links(html: &str, base_url: &str) -> Vec<Issue> {
    let links = extract_http_links(html);
    debug!("Found {} insecure links on {}", links.len(), base_url);

    links
        .into_iter()
        .map(|link| Issue::medium(format!("Page contains insecure link: {}", link)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageprobe_core::RiskLevel;

    #[test]
    fn test_counts_every_occurrence() {
        let html = r#"
            <a href="http://a.test/one">1</a>
            <a href='http://b.test/two'>2</a>
            <a href="http://a.test/one">again</a>
        "#;
        let issues = check_insecure_links(html, "https://example.com");
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| i.risk == RiskLevel::Medium));
        assert_eq!(issues[0].message, "Page contains insecure link: http://a.test/one");
        assert_eq!(issues[1].message, "Page contains insecure link: http://b.test/two");
    }

    #[test]
    fn test_ignores_https_and_relative_links() {
        let html = r#"<a href="https://secure.test">s</a><a href="/local">l</a><img src="http://img.test/x.png">"#;
        assert!(check_insecure_links(html, "https://example.com").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let html = r#"<A HREF="HTTP://UPPER.TEST/">x</A>"#;
        assert_eq!(extract_http_links(html), vec!["HTTP://UPPER.TEST/"]);
    }

    #[test]
    fn test_no_href_attributes() {
        assert!(check_insecure_links("", "https://example.com").is_empty());
        assert!(check_insecure_links("<p>plain text http://x.test</p>", "https://example.com").is_empty());
    }
}
