//! Error types for the gleaner host.

use gleaner_search::SearchError;

/// Top-level error type for the report service.
#[derive(Debug, thiserror::Error)]
pub enum GleanerError {
    /// Configuration could not be loaded or is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Search or extraction pipeline error.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// I/O error (config file, report output).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP server setup or runtime error.
    #[error("server error: {0}")]
    Server(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, GleanerError>;
