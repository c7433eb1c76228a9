//! Main batch fetcher implementation.
//!
//! This module provides the primary `UrlFetcher` struct that exposes the
//! two retrieval strategies over a batch of URLs: the strictly sequential
//! baseline and the throttled-concurrent path, both driving the same
//! injected fetch-one primitive.

use crate::concurrent::run_windowed;
use crate::error::FetchError;
use crate::transport::{FetchTransport, HttpTransport};
use crate::types::{FailureReason, FetchOutcome, FetcherConfig};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Batch URL fetcher coordinating sequential and throttled retrieval.
///
/// Both strategies produce one `FetchOutcome` per input URL, in input
/// order. Per-item failures are contained inside the result sequence;
/// only configuration errors are raised to the caller.
///
/// # Example
///
/// ```rust,no_run
/// use url_fetch::UrlFetcher;
/// use url::Url;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let fetcher = UrlFetcher::new();
///     let uris = vec![
///         Url::parse("https://example.com/a")?,
///         Url::parse("https://example.com/b")?,
///     ];
///     let results = fetcher.fetch_all_throttled(&uris, 2).await?;
///     assert_eq!(results.len(), uris.len());
///     Ok(())
/// }
/// ```
pub struct UrlFetcher {
    /// Configuration settings for this fetcher instance
    config: FetcherConfig,
    /// The fetch-one capability shared by both strategies
    transport: Arc<dyn FetchTransport>,
}

impl UrlFetcher {
    /// Create a new fetcher with default configuration and the default
    /// HTTP transport.
    ///
    /// Default settings:
    /// - Concurrency: 10
    /// - Per-fetch deadline: none
    /// - HTTP socket timeout: 30 seconds
    pub fn new() -> Self {
        Self::with_config(FetcherConfig::default())
    }

    /// Create a new fetcher with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use url_fetch::{UrlFetcher, FetcherConfig};
    /// use std::time::Duration;
    ///
    /// let config = FetcherConfig::default()
    ///     .with_max_concurrent(4)
    ///     .with_fetch_timeout(Duration::from_secs(5));
    ///
    /// let fetcher = UrlFetcher::with_config(config);
    /// ```
    pub fn with_config(config: FetcherConfig) -> Self {
        let transport =
            HttpTransport::with_config(&config).expect("Failed to create HTTP transport");

        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Create a new fetcher with a custom fetch capability.
    ///
    /// The transport is the seam for tests and for callers that retrieve
    /// content by other means than plain HTTP GET.
    pub fn with_transport(config: FetcherConfig, transport: Arc<dyn FetchTransport>) -> Self {
        Self { config, transport }
    }

    /// Fetch every URL one at a time, in input order.
    ///
    /// The synchronous baseline for comparing against the throttled
    /// strategy: N fetches, strictly serialized, no overlap. A failure on
    /// one URL does not prevent attempting the next; it contributes a
    /// failure outcome at its slot.
    pub async fn fetch_all_sequential(&self, uris: &[Url]) -> Result<Vec<FetchOutcome>, FetchError> {
        tracing::debug!(count = uris.len(), "starting sequential batch");

        let mut results = Vec::with_capacity(uris.len());
        for uri in uris {
            let outcome = fetch_one(
                Arc::clone(&self.transport),
                uri.clone(),
                self.config.fetch_timeout,
            )
            .await;
            results.push(outcome);
        }

        Ok(results)
    }

    /// Fetch every URL with at most `max_concurrent` in flight.
    ///
    /// Produces the same ordered result sequence as
    /// [`fetch_all_sequential`](Self::fetch_all_sequential) — the
    /// concurrency level changes timing, never logical results. The batch
    /// is processed in consecutive windows of `max_concurrent` fetches;
    /// each window is joined in full before the next starts, so peak
    /// concurrency is bounded at exactly `max_concurrent`.
    ///
    /// Without a configured `fetch_timeout`, a hung fetch blocks its
    /// window's barrier and therefore the rest of the batch indefinitely.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Config` if `max_concurrent` is zero, before
    /// any fetch is attempted. Per-item failures do not raise errors.
    pub async fn fetch_all_throttled(
        &self,
        uris: &[Url],
        max_concurrent: usize,
    ) -> Result<Vec<FetchOutcome>, FetchError> {
        validate_concurrency(max_concurrent)?;

        tracing::debug!(
            count = uris.len(),
            max_concurrent,
            "starting throttled batch"
        );

        let timeout = self.config.fetch_timeout;
        let results = run_windowed(uris.len(), max_concurrent, |i| {
            fetch_one(Arc::clone(&self.transport), uris[i].clone(), timeout)
        })
        .await;

        Ok(results)
    }

    /// Fetch every URL using the configured concurrency limit.
    ///
    /// Convenience wrapper around
    /// [`fetch_all_throttled`](Self::fetch_all_throttled) with
    /// `FetcherConfig::max_concurrent`.
    pub async fn fetch_all(&self, uris: &[Url]) -> Result<Vec<FetchOutcome>, FetchError> {
        self.fetch_all_throttled(uris, self.config.max_concurrent)
            .await
    }

    /// Compute a content digest of the resource at `uri`.
    ///
    /// Declared but not implemented: always fails with
    /// `FetchError::NotImplemented`, never a placeholder digest. The
    /// eventual contract is "runs asynchronously and returns a digest
    /// string or fails".
    pub async fn resource_digest(&self, uri: &Url) -> Result<String, FetchError> {
        Err(FetchError::not_implemented(format!(
            "resource digest for {}",
            uri
        )))
    }

    /// Get the current configuration for this fetcher.
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }
}

impl Default for UrlFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject a concurrency limit that cannot drive any window.
fn validate_concurrency(max_concurrent: usize) -> Result<(), FetchError> {
    if max_concurrent == 0 {
        return Err(FetchError::config(
            "max_concurrent must be at least 1 (got 0)",
        ));
    }
    Ok(())
}

/// The shared fetch-one step: the injected primitive, wrapped with the
/// optional per-fetch deadline. Used unmodified by both strategies.
async fn fetch_one(
    transport: Arc<dyn FetchTransport>,
    uri: Url,
    deadline: Option<Duration>,
) -> FetchOutcome {
    match deadline {
        None => transport.fetch(&uri).await,
        Some(limit) => match tokio::time::timeout(limit, transport.fetch(&uri)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::debug!(%uri, ?limit, "fetch deadline elapsed");
                FetchOutcome::Failed(FailureReason::Timeout)
            }
        },
    }
}
