//! Advertising and tracking URL classification.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. Non-`http(s)` or unparseable URLs are rejected.
//! 2. Known ad-network fragments in the host or the full URL.
//! 3. Ad-click endpoints on search engine hosts.
//! 4. Script and stylesheet assets.
//! 5. Optionally blocked social/retail/video hosts.

use url::Url;

use crate::config::FilterConfig;

use super::host_matches;

/// Returns `true` if `url` looks like an advertisement, tracking redirect
/// or other non-article link that should be discarded.
///
/// # Examples
///
/// ```
/// use gleaner_search::config::FilterConfig;
/// use gleaner_search::filter::is_ad_or_tracking;
///
/// let filter = FilterConfig::default();
/// assert!(is_ad_or_tracking("https://ad.doubleclick.net/x", &filter));
/// assert!(is_ad_or_tracking("ftp://example.com/file", &filter));
/// assert!(!is_ad_or_tracking("https://example.com/article", &filter));
/// ```
pub fn is_ad_or_tracking(url: &str, filter: &FilterConfig) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return true;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return true;
    }

    let host = parsed.host_str().unwrap_or_default().to_lowercase();
    let path = parsed.path().to_lowercase();
    let query = parsed.query().unwrap_or_default().to_lowercase();
    let full = url.to_lowercase();

    if filter
        .ad_fragments
        .iter()
        .any(|fragment| host.contains(fragment.as_str()) || full.contains(fragment.as_str()))
    {
        return true;
    }

    if filter
        .search_engine_domains
        .iter()
        .any(|domain| host_matches(&host, domain))
    {
        let ad_path = filter
            .ad_click_paths
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()));
        let ad_target = filter
            .ad_redirect_keys
            .iter()
            .any(|key| query.contains(key.as_str()));
        if ad_path || ad_target {
            return true;
        }
    }

    if filter
        .asset_extensions
        .iter()
        .any(|ext| path.ends_with(ext.as_str()))
    {
        return true;
    }

    filter.block_optional_domains
        && filter
            .optionally_blocked_domains
            .iter()
            .any(|domain| host.contains(domain.as_str()))
}

impl FilterConfig {
    /// Shorthand for [`is_ad_or_tracking`] with this configuration.
    pub fn is_ad_or_tracking(&self, url: &str) -> bool {
        is_ad_or_tracking(url, self)
    }
}
