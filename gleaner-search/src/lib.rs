//! # gleaner-search
//!
//! Search, filter and extract: turns a query into a short list of readable
//! article texts.
//!
//! ## Design
//!
//! - Raw hits come from a pluggable [`SearchProvider`]: SerpApi (keyed JSON
//!   API) or DuckDuckGo (keyless HTML scraping), chosen by configuration
//! - Ad and tracking links are discarded by a configurable substring
//!   classifier before anything is fetched
//! - Surviving URLs are canonicalised: redirect wrappers unwrapped,
//!   `utm_*` and click-id parameters removed
//! - Each page is fetched once and passed through a readability pass, with
//!   a plain paragraph scrape as fallback
//! - Pages are processed sequentially in rank order until the requested
//!   number of results is reached
//!
//! ## Failure model
//!
//! Only the provider can fail an aggregation. Per-page fetch and parse
//! errors are logged at debug level and the page is skipped. Queries are
//! logged at trace/debug level only.

pub mod aggregator;
pub mod config;
pub mod content;
pub mod error;
pub mod filter;
pub mod http;
pub mod provider;
pub mod providers;
pub mod types;

pub use aggregator::{aggregate, AggregateOptions};
pub use config::{FilterConfig, SearchConfig};
pub use content::Extractor;
pub use error::{Result, SearchError};
pub use provider::{Provider, SearchProvider};
pub use types::{ExtractedContent, ProviderKind, ResultSet, SearchHit};

/// Search for `query` and return up to `limit` extracted pages.
///
/// Builds the configured provider and an extractor from `config`, then runs
/// [`aggregate`].
///
/// # Errors
///
/// Returns [`SearchError::Config`] for invalid configuration or arguments,
/// and [`SearchError::Provider`] if the provider cannot be reached or has no
/// SerpApi key.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> gleaner_search::Result<()> {
/// let config = gleaner_search::SearchConfig {
///     provider: gleaner_search::ProviderKind::DuckDuckGo,
///     ..Default::default()
/// };
/// let results = gleaner_search::search_and_extract("cricket", 2, &config).await?;
/// for result in &results {
///     println!("{}: {}", result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_and_extract(
    query: &str,
    limit: usize,
    config: &SearchConfig,
) -> Result<ResultSet> {
    config.validate()?;
    let provider = Provider::from_config(config)?;
    let extractor = Extractor::from_config(config)?;
    aggregate(
        &provider,
        &extractor,
        &config.filter,
        query,
        limit,
        &config.aggregate_options(),
    )
    .await
}
