//! Error types for the gleaner-search crate.
//!
//! Only [`SearchError::Provider`] and [`SearchError::Config`] ever reach the
//! caller of an aggregation. Per-URL fetch and parse failures are caught
//! inside the extractor and degrade to empty content. No API keys appear in
//! error messages.

/// Errors that can occur while searching and extracting.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search provider was unreachable, unauthenticated or returned
    /// malformed data.
    #[error("search provider error: {0}")]
    Provider(String),

    /// Fetching a result page failed (network, timeout, non-200 status).
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Extracting text from fetched markup failed or produced nothing.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid configuration or arguments.
    #[error("config error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP error: {0}")]
    Http(String),
}

/// Convenience type alias for gleaner-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
