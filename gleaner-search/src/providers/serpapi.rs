//! SerpApi provider: Google organic results through a keyed JSON API.
//!
//! Issues `GET /search.json?engine=google&q=..&num=..&api_key=..` and reads
//! `organic_results[].{title,link}`. Ads and knowledge panels live in other
//! response fields and are never read.

use crate::config::DEFAULT_SERPAPI_BASE_URL;
use crate::error::SearchError;
use crate::provider::SearchProvider;
use crate::types::{ProviderKind, SearchHit};
use serde::Deserialize;

/// SerpApi's message for a query with no organic results.
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

/// Keyed SerpApi search backend.
#[derive(Debug, Clone)]
pub struct SerpApiProvider {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

impl SerpApiProvider {
    /// Create a provider. The key may be absent; searches then fail with
    /// [`SearchError::Provider`].
    pub fn new(api_key: Option<String>, client: reqwest::Client) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_SERPAPI_BASE_URL.to_owned(),
            client,
        }
    }

    /// Point the provider at a different endpoint (e.g. a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl SearchProvider for SerpApiProvider {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>, SearchError> {
        let Some(api_key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Err(SearchError::Provider(
                "SerpApi key is not configured (set SERPAPI_KEY)".into(),
            ));
        };

        tracing::trace!(query, count, "SerpApi search");

        let url = format!("{}/search.json", self.base_url.trim_end_matches('/'));
        let num = count.to_string();

        // `without_url` keeps the API key out of error messages.
        let response = self
            .client
            .get(&url)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("num", num.as_str()),
                ("api_key", api_key),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Provider(format!("SerpApi request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Provider(format!("SerpApi response read failed: {}", e.without_url())))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<SerpApiResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| "no error detail".to_owned());
            return Err(SearchError::Provider(format!(
                "SerpApi returned {status}: {detail}"
            )));
        }

        let mut hits = parse_serpapi_json(&body)?;
        hits.truncate(count);
        tracing::debug!(count = hits.len(), "SerpApi results parsed");
        Ok(hits)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::SerpApi
    }
}

/// Parse a SerpApi JSON body into hits, preserving rank order.
pub(crate) fn parse_serpapi_json(body: &str) -> Result<Vec<SearchHit>, SearchError> {
    let response: SerpApiResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Provider(format!("malformed SerpApi response: {e}")))?;

    if response.organic_results.is_empty() {
        if let Some(error) = response.error {
            if !error.contains(NO_RESULTS_MARKER) {
                return Err(SearchError::Provider(format!("SerpApi error: {error}")));
            }
        }
    }

    Ok(response
        .organic_results
        .into_iter()
        .filter_map(|r| {
            let link = r.link?;
            Some(SearchHit::new(r.title.unwrap_or_default(), link))
        })
        .collect())
}
