//! # url-fetch
//!
//! A library for fetching the textual content of a batch of URLs, with a
//! choice between two retrieval strategies over the same input:
//!
//! - **Sequential**: one fetch at a time, in input order — the baseline.
//! - **Throttled**: up to K fetches in flight at once, processed in
//!   consecutive windows that are fully joined before the next starts.
//!
//! Both strategies return one outcome per input URL, in input order,
//! regardless of how completions interleave. A fetch that produces no
//! content contributes a tagged failure value at its slot; it never
//! aborts siblings, later windows, or the batch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use url_fetch::UrlFetcher;
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = UrlFetcher::new();
//!     let uris = vec![
//!         Url::parse("https://example.com/")?,
//!         Url::parse("https://example.org/")?,
//!     ];
//!
//!     let results = fetcher.fetch_all_throttled(&uris, 2).await?;
//!     for (uri, outcome) in uris.iter().zip(&results) {
//!         println!("{}: {} bytes", uri, outcome.content().map_or(0, str::len));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Bounded concurrency**: a hard cap on in-flight fetches, enforced
//!   by window barriers rather than a sliding limit
//! - **Order preservation**: results always correspond positionally to
//!   the input batch
//! - **Failure containment**: per-item failures are values, not errors
//! - **Injectable transport**: the fetch-one primitive sits behind a
//!   trait, so tests and non-HTTP callers can supply their own

// Re-export main public API types and functions
// This makes them available as url_fetch::TypeName
pub use error::FetchError;
pub use fetcher::UrlFetcher;
pub use transport::{FetchTransport, HttpTransport};
pub use types::{FailureReason, FetchOutcome, FetcherConfig};

// Internal modules - these are not part of the public API
mod concurrent;
mod error;
mod fetcher;
mod transport;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, FetchError>;

// Library version metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
