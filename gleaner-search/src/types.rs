//! Core types for search hits, extracted pages and provider identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when a provider returns a hit without one.
pub const UNTITLED: &str = "No title";

/// A single raw result returned by a search provider, before filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The title of the result page.
    pub title: String,
    /// The URL exactly as the provider returned it.
    pub url: String,
}

impl SearchHit {
    /// Build a hit, substituting [`UNTITLED`] for a blank title.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            UNTITLED.to_owned()
        } else {
            title.trim().to_owned()
        };
        Self {
            title,
            url: url.into(),
        }
    }
}

/// Readable text extracted from one accepted hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Title reported by the search provider.
    pub title: String,
    /// Canonical URL (tracking parameters stripped, redirects unwrapped).
    pub url: String,
    /// Extracted text, never empty, truncated to the configured budget.
    pub content: String,
}

/// Accepted results in provider rank order.
pub type ResultSet = Vec<ExtractedContent>;

/// Supported search result providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// SerpApi Google results. Needs an API key.
    #[default]
    SerpApi,
    /// DuckDuckGo HTML endpoint. No key required.
    DuckDuckGo,
}

impl ProviderKind {
    /// Returns the human-readable name of this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SerpApi => "SerpApi",
            Self::DuckDuckGo => "DuckDuckGo",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
