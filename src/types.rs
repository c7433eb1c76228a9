//! Core data types for batch URL fetching.
//!
//! This module defines the outcome types produced by fetch operations and
//! the configuration options that control them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of fetching a single URL.
///
/// Tied 1:1 to its request by position: the outcome at index `i` of a
/// result sequence belongs to the URL at index `i` of the input batch.
/// Failures are ordinary values here, never errors — a failed fetch keeps
/// its slot so the correspondence between input and output never drifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchOutcome {
    /// The full textual content of the resource.
    Content(String),

    /// No content could be retrieved; the reason says why.
    Failed(FailureReason),
}

impl FetchOutcome {
    /// Whether this outcome carries content.
    pub fn is_content(&self) -> bool {
        matches!(self, Self::Content(_))
    }

    /// Whether this outcome is a failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The content, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Content(text) => Some(text),
            Self::Failed(_) => None,
        }
    }

    /// The failure reason, if any.
    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            Self::Content(_) => None,
            Self::Failed(reason) => Some(reason),
        }
    }

    /// Flatten the outcome into a plain string.
    ///
    /// Compatibility shim for callers that want a flat sequence of
    /// strings: content is returned as-is, a failure becomes a marker of
    /// the form `"<uri> unavailable: <reason>"`. Prefer matching on the
    /// enum; the marker exists only for display and legacy comparison.
    pub fn into_string(self, uri: &url::Url) -> String {
        match self {
            Self::Content(text) => text,
            Self::Failed(reason) => format!("{} unavailable: {}", uri, reason),
        }
    }
}

/// Why a fetch produced no content.
///
/// Tagged so callers and tests can distinguish causes without matching on
/// message strings. Every variant has the same batch-level meaning: the
/// slot holds no content, siblings and later windows are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// A connection to the host could not be established.
    #[serde(rename = "connect")]
    Connect,

    /// The fetch exceeded the configured deadline.
    #[serde(rename = "timeout")]
    Timeout,

    /// The server answered with a non-success HTTP status.
    #[serde(rename = "status")]
    Status(u16),

    /// The URL scheme is not supported by the transport.
    #[serde(rename = "unsupported_scheme")]
    UnsupportedScheme,

    /// The concurrent worker running the fetch failed to complete.
    #[serde(rename = "interrupted")]
    Interrupted,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Connect => write!(f, "connection failed"),
            FailureReason::Timeout => write!(f, "timed out"),
            FailureReason::Status(code) => write!(f, "HTTP status {}", code),
            FailureReason::UnsupportedScheme => write!(f, "unsupported URL scheme"),
            FailureReason::Interrupted => write!(f, "fetch interrupted"),
        }
    }
}

/// Configuration options for batch fetch operations.
///
/// Controls concurrency, per-fetch deadlines, and the default HTTP
/// transport's behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Maximum number of concurrent fetches for the throttled strategy.
    /// Default: 10. Must be at least 1; validated before any fetch.
    pub max_concurrent: usize,

    /// Optional deadline applied to each individual fetch.
    ///
    /// Default: `None`, meaning a hung fetch blocks its window's barrier
    /// (and therefore the rest of the batch) indefinitely. Callers who
    /// cannot tolerate that stall should set a deadline; an elapsed
    /// deadline yields `FailureReason::Timeout` for that item only.
    #[serde(skip)] // Don't serialize Duration directly
    pub fetch_timeout: Option<Duration>,

    /// Socket-level timeout for the default HTTP transport.
    /// Default: 30 seconds.
    #[serde(skip)] // Don't serialize Duration directly
    pub request_timeout: Duration,

    /// User-Agent header sent by the default HTTP transport.
    pub user_agent: String,
}

impl Default for FetcherConfig {
    /// Create a sensible default configuration.
    ///
    /// No per-fetch deadline by default — matching the historical
    /// behavior — but a conservative socket timeout on the HTTP client
    /// so plain network hangs do not pin a window forever.
    fn default() -> Self {
        Self {
            max_concurrent: 10,
            fetch_timeout: None,
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("url-fetch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetcherConfig {
    /// Set the concurrency limit for the throttled strategy.
    ///
    /// The value is stored as given; a zero limit is rejected with a
    /// configuration error when a fetch operation is invoked.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    /// Set a deadline for each individual fetch.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Set the socket-level timeout for the default HTTP transport.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the User-Agent header for the default HTTP transport.
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let ok = FetchOutcome::Content("hello".to_string());
        assert!(ok.is_content());
        assert!(!ok.is_failed());
        assert_eq!(ok.content(), Some("hello"));
        assert_eq!(ok.failure(), None);

        let bad = FetchOutcome::Failed(FailureReason::Status(404));
        assert!(bad.is_failed());
        assert_eq!(bad.content(), None);
        assert_eq!(bad.failure(), Some(&FailureReason::Status(404)));
    }

    #[test]
    fn test_into_string_marker() {
        let uri = url::Url::parse("https://example.com/missing").unwrap();

        let ok = FetchOutcome::Content("body".to_string());
        assert_eq!(ok.into_string(&uri), "body");

        let bad = FetchOutcome::Failed(FailureReason::Status(404));
        let marker = bad.into_string(&uri);
        assert!(marker.contains("https://example.com/missing"));
        assert!(marker.contains("unavailable"));
        assert!(marker.contains("404"));
    }

    #[test]
    fn test_default_config() {
        let config = FetcherConfig::default();
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.fetch_timeout, None);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("url-fetch/"));
    }

    #[test]
    fn test_config_builder() {
        let config = FetcherConfig::default()
            .with_max_concurrent(4)
            .with_fetch_timeout(Duration::from_secs(2))
            .with_user_agent("test-agent");

        assert_eq!(config.max_concurrent, 4);
        assert_eq!(config.fetch_timeout, Some(Duration::from_secs(2)));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_failure_reason_display() {
        assert_eq!(FailureReason::Connect.to_string(), "connection failed");
        assert_eq!(FailureReason::Status(503).to_string(), "HTTP status 503");
        assert_eq!(FailureReason::Timeout.to_string(), "timed out");
    }
}
