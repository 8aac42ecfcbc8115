//! DuckDuckGo provider: keyless scraping of the HTML-only endpoint.
//!
//! POSTs the query to `/html/`, which needs no JavaScript and tolerates
//! automated requests, then parses result blocks with CSS selectors.

use crate::config::DEFAULT_DUCKDUCKGO_BASE_URL;
use crate::error::SearchError;
use crate::filter::unwrap_redirect;
use crate::provider::SearchProvider;
use crate::types::{ProviderKind, SearchHit};
use scraper::{Html, Selector};
use url::Url;

/// DuckDuckGo HTML search backend.
#[derive(Debug, Clone)]
pub struct DuckDuckGoProvider {
    base_url: String,
    client: reqwest::Client,
}

impl DuckDuckGoProvider {
    /// Create a provider using the public endpoint.
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            base_url: DEFAULT_DUCKDUCKGO_BASE_URL.to_owned(),
            client,
        }
    }

    /// Point the provider at a different endpoint (e.g. a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl SearchProvider for DuckDuckGoProvider {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>, SearchError> {
        tracing::trace!(query, count, "DuckDuckGo search");

        let url = format!("{}/html/", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| SearchError::Provider(format!("DuckDuckGo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Provider(format!("DuckDuckGo HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Provider(format!("DuckDuckGo response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

        parse_duckduckgo_html(&html, count)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::DuckDuckGo
    }
}

/// Resolve a result href to an absolute URL, unwrapping DDG's `/l/?uddg=` redirect.
fn resolve_href(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_owned()
    };
    Url::parse(&absolute).ok()?;
    Some(unwrap_redirect(&absolute))
}

/// Parse a DuckDuckGo HTML page into hits, skipping sponsored blocks.
pub(crate) fn parse_duckduckgo_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<SearchHit>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| SearchError::Provider(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| SearchError::Provider(format!("invalid title selector: {e:?}")))?;

    let mut hits = Vec::new();

    for element in document.select(&result_sel) {
        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };
        let Some(url) = title_el.value().attr("href").and_then(resolve_href) else {
            continue;
        };

        let title = title_el.text().collect::<String>();
        hits.push(SearchHit::new(title, url));

        if hits.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = hits.len(), "DuckDuckGo results parsed");
    Ok(hits)
}
