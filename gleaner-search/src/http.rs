//! HTTP clients for provider queries and page fetches.
//!
//! Each [`ClientRole`] gets its own `Accept` header and redirect budget.
//! All clients share the configured timeout and User-Agent, carry no cookie
//! store, and decompress gzip and brotli bodies.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::ProviderKind;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::redirect::Policy;
use std::time::Duration;

/// Browser User-Agents used when none is configured.
const BROWSER_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Upper bound on the TCP/TLS connect phase, below the request timeout.
const MAX_CONNECT_SECS: u64 = 5;

/// What a client is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRole {
    /// Talks to a search provider's endpoint.
    Provider(ProviderKind),
    /// Fetches result pages for extraction.
    Page,
}

impl ClientRole {
    fn accept(self) -> &'static str {
        match self {
            Self::Provider(ProviderKind::SerpApi) => "application/json",
            Self::Provider(ProviderKind::DuckDuckGo) => "text/html",
            Self::Page => "text/html,application/xhtml+xml;q=0.9,*/*;q=0.5",
        }
    }

    /// Redirects followed before the request fails.
    fn max_redirects(self) -> usize {
        match self {
            Self::Provider(_) => 3,
            Self::Page => 10,
        }
    }
}

/// Build a client for `role` from `config`.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig, role: ClientRole) -> Result<reqwest::Client, SearchError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(role.accept()));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    let timeout = Duration::from_secs(config.timeout_seconds);
    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(MAX_CONNECT_SECS)))
        .user_agent(user_agent(config))
        .redirect(Policy::limited(role.max_redirects()))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build {role:?} client: {e}")))
}

/// The configured User-Agent, or a random browser one.
pub fn user_agent(config: &SearchConfig) -> String {
    match config.user_agent.as_deref().map(str::trim) {
        Some(custom) if !custom.is_empty() => custom.to_owned(),
        _ => {
            let idx = rand::thread_rng().gen_range(0..BROWSER_USER_AGENTS.len());
            BROWSER_USER_AGENTS[idx].to_owned()
        }
    }
}
