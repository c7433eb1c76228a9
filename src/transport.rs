//! The fetch-one-resource capability.
//!
//! This module defines the transport seam: the single-URL fetch primitive
//! that both retrieval strategies share. The orchestration code never
//! touches the network directly — it calls whatever `FetchTransport` it
//! was handed, which also gives tests a place to inject deterministic
//! fakes.

use crate::error::FetchError;
use crate::types::{FailureReason, FetchOutcome, FetcherConfig};
use async_trait::async_trait;
use url::Url;

/// The injected fetch capability.
///
/// Given one URL, retrieve its full textual content, or report why no
/// content was available. Implementations must be infallible at the error
/// channel: every non-content outcome collapses into a `FailureReason`,
/// and all connection/stream resources must be released on every exit
/// path before returning.
#[async_trait]
pub trait FetchTransport: Send + Sync {
    /// Fetch the entire content of `uri` into memory.
    async fn fetch(&self, uri: &Url) -> FetchOutcome;
}

/// Default HTTP(S) transport backed by a shared `reqwest::Client`.
///
/// Buffers the whole response body as text. Schemes other than `http`
/// and `https` are reported as unsupported rather than attempted.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with default configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(&FetcherConfig::default())
    }

    /// Create a transport configured with the given socket timeout and
    /// User-Agent.
    pub fn with_config(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                FetchError::transport_with_source("Failed to create HTTP client", e.to_string())
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FetchTransport for HttpTransport {
    async fn fetch(&self, uri: &Url) -> FetchOutcome {
        if uri.scheme() != "http" && uri.scheme() != "https" {
            tracing::debug!(%uri, scheme = uri.scheme(), "unsupported scheme");
            return FetchOutcome::Failed(FailureReason::UnsupportedScheme);
        }

        let response = match self.client.get(uri.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%uri, error = %e, "request failed");
                return FetchOutcome::Failed(classify_request_error(&e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%uri, status = status.as_u16(), "non-success status");
            return FetchOutcome::Failed(FailureReason::Status(status.as_u16()));
        }

        match response.text().await {
            Ok(body) => FetchOutcome::Content(body),
            Err(e) => {
                tracing::debug!(%uri, error = %e, "failed to read body");
                FetchOutcome::Failed(classify_request_error(&e))
            }
        }
    }
}

/// Collapse a reqwest error into a failure reason.
fn classify_request_error(err: &reqwest::Error) -> FailureReason {
    if err.is_timeout() {
        FailureReason::Timeout
    } else {
        FailureReason::Connect
    }
}
