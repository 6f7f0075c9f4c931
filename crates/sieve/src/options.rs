// ABOUTME: Configuration options for the fetch pipeline and header-spec parsing.
// ABOUTME: Defaults match the tool's CLI: concurrency 40, delay 100ms, timeout 30s.

use std::time::Duration;

/// Configuration for the fetch pipeline.
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum number of in-flight fetches at any instant.
    pub concurrency: usize,
    /// Minimum spacing between successive fetch dispatches, applied globally.
    pub delay: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent sent when no `-H` override is given.
    pub user_agent: String,
    /// Headers applied verbatim to every outgoing request, in order.
    pub headers: Vec<(String, String)>,
    /// Use a custom HTTP client instead of building one.
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            concurrency: 40,
            delay: Duration::from_millis(100),
            timeout: Duration::from_secs(30),
            user_agent: "html-sieve/0.1".to_string(),
            headers: Vec::new(),
            http_client: None,
        }
    }
}

/// Parse repeatable `name:value` header specs.
///
/// The value is everything after the first `:`, kept verbatim (no trimming).
/// Specs without a `:` are dropped silently.
pub fn parse_header_specs(specs: &[String]) -> Vec<(String, String)> {
    specs
        .iter()
        .filter_map(|spec| {
            let (name, value) = spec.split_once(':')?;
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert_eq!(opts.concurrency, 40);
        assert_eq!(opts.delay, Duration::from_millis(100));
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert!(opts.headers.is_empty());
    }

    #[test]
    fn header_spec_splits_on_first_colon() {
        let parsed = parse_header_specs(&["Cookie:a=b".to_string()]);
        assert_eq!(parsed, vec![("Cookie".to_string(), "a=b".to_string())]);

        let parsed = parse_header_specs(&["X-Forwarded-For:127.0.0.1:8080".to_string()]);
        assert_eq!(
            parsed,
            vec![("X-Forwarded-For".to_string(), "127.0.0.1:8080".to_string())]
        );
    }

    #[test]
    fn header_value_is_kept_verbatim() {
        let parsed = parse_header_specs(&["X-Test: spaced ".to_string()]);
        assert_eq!(parsed, vec![("X-Test".to_string(), " spaced ".to_string())]);
    }

    #[test]
    fn spec_without_colon_is_dropped() {
        let parsed = parse_header_specs(&[
            "no-colon-here".to_string(),
            "Kept:yes".to_string(),
        ]);
        assert_eq!(parsed, vec![("Kept".to_string(), "yes".to_string())]);
    }

    #[test]
    fn empty_value_is_kept() {
        let parsed = parse_header_specs(&["X-Empty:".to_string()]);
        assert_eq!(parsed, vec![("X-Empty".to_string(), String::new())]);
    }
}
