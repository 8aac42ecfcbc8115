//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which provider is queried, timeouts, the
//! extraction budget and oversampling. [`FilterConfig`] holds the substring
//! lists used by the ad/tracking classifier so operators can tune how strict
//! it is without a rebuild.

use crate::error::SearchError;
use crate::types::ProviderKind;
use serde::{Deserialize, Serialize};

/// Default SerpApi endpoint.
pub const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com";

/// Default DuckDuckGo HTML-only endpoint.
pub const DEFAULT_DUCKDUCKGO_BASE_URL: &str = "https://html.duckduckgo.com";

/// Configuration for a search-and-extract run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Which provider supplies the raw hits.
    pub provider: ProviderKind,
    /// SerpApi key. Read from the environment by the host, never by this crate.
    #[serde(skip)]
    pub serpapi_key: Option<String>,
    /// Base URL for SerpApi requests (overridable for tests).
    pub serpapi_base_url: String,
    /// Base URL for DuckDuckGo requests (overridable for tests).
    pub duckduckgo_base_url: String,
    /// Per-request HTTP timeout in seconds, for both provider and page fetches.
    pub timeout_seconds: u64,
    /// Maximum characters of extracted text kept per page.
    pub max_chars: usize,
    /// How many raw hits to request per wanted result.
    pub oversample_factor: usize,
    /// Minimum extracted length for a page to count. 0 accepts any non-empty text.
    pub min_content_chars: usize,
    /// Largest number of results one request may ask for.
    pub max_limit: usize,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Ad/tracking classifier lists.
    pub filter: FilterConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            serpapi_key: None,
            serpapi_base_url: DEFAULT_SERPAPI_BASE_URL.to_owned(),
            duckduckgo_base_url: DEFAULT_DUCKDUCKGO_BASE_URL.to_owned(),
            timeout_seconds: 12,
            max_chars: 2000,
            oversample_factor: 3,
            min_content_chars: 0,
            max_limit: 20,
            user_agent: None,
            filter: FilterConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `max_chars` must be greater than 0
    /// - `oversample_factor` must be greater than 0
    /// - `max_limit` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_chars == 0 {
            return Err(SearchError::Config(
                "max_chars must be greater than 0".into(),
            ));
        }
        if self.oversample_factor == 0 {
            return Err(SearchError::Config(
                "oversample_factor must be greater than 0".into(),
            ));
        }
        if self.max_limit == 0 {
            return Err(SearchError::Config(
                "max_limit must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Aggregation knobs derived from this config.
    pub fn aggregate_options(&self) -> crate::aggregator::AggregateOptions {
        crate::aggregator::AggregateOptions {
            oversample_factor: self.oversample_factor,
            max_chars: self.max_chars,
            min_content_chars: self.min_content_chars,
            max_limit: self.max_limit,
        }
    }
}

/// Substring lists consulted by [`crate::filter::is_ad_or_tracking`].
///
/// Every entry is matched case-insensitively; store them lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Ad-network and click-tracking fragments, matched against host and full URL.
    pub ad_fragments: Vec<String>,
    /// Social/retail/video hosts blocked when `block_optional_domains` is set.
    pub optionally_blocked_domains: Vec<String>,
    /// Whether `optionally_blocked_domains` is applied at all.
    pub block_optional_domains: bool,
    /// Search engine hosts whose ad endpoints are rejected.
    pub search_engine_domains: Vec<String>,
    /// Path prefixes on search engine hosts that denote ad clicks.
    pub ad_click_paths: Vec<String>,
    /// Query fragments on search engine hosts that carry an ad target.
    pub ad_redirect_keys: Vec<String>,
    /// File extensions of scripts and stylesheets.
    pub asset_extensions: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ad_fragments: owned(&[
                "googlesyndication.",
                "googleadservices.",
                "doubleclick.",
                "g.doubleclick.",
                "adservice.google.",
                "tpc.googlesyndication.",
                "adsystem.",
                "adnxs.",
                "taboola.",
                "outbrain.",
                "bing.com/aclick",
            ]),
            optionally_blocked_domains: owned(&[
                "facebook.",
                "pinterest.",
                "linkedin.",
                "twitter.",
                "x.com",
                "instagram.",
                "youtube.",
                "youtu.be",
                "amazon.",
                "ebay.",
                "quora.",
                "reddit.",
                "news.google.",
                "webcache.googleusercontent.com",
            ]),
            block_optional_domains: true,
            search_engine_domains: owned(&["google.com"]),
            ad_click_paths: owned(&["/aclk", "/ads"]),
            ad_redirect_keys: owned(&["adurl="]),
            asset_extensions: owned(&[".js", ".css"]),
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}
