//! Pluggable search result providers.
//!
//! A provider turns a query into a ranked list of raw [`SearchHit`]s. The
//! aggregator only depends on [`SearchProvider`], so tests can substitute a
//! fake, and the concrete backend is picked by configuration through
//! [`Provider`].

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http::{self, ClientRole};
use crate::providers::{DuckDuckGoProvider, SerpApiProvider};
use crate::types::{ProviderKind, SearchHit};

/// A source of ranked search hits.
///
/// Implementors handle their own request construction, authentication and
/// response parsing. Any failure to obtain hits, a missing credential
/// included, is reported as [`SearchError::Provider`] and aborts the
/// aggregation that asked for them.
///
/// All implementations must be `Send + Sync`.
pub trait SearchProvider: Send + Sync {
    /// Return up to `count` hits for `query`, best first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the provider cannot be reached or its
    /// response cannot be understood.
    fn search(
        &self,
        query: &str,
        count: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>, SearchError>> + Send;

    /// Which backend this is.
    fn kind(&self) -> ProviderKind;
}

/// The provider selected by [`SearchConfig::provider`].
#[derive(Debug, Clone)]
pub enum Provider {
    /// Keyed SerpApi backend.
    SerpApi(SerpApiProvider),
    /// Keyless DuckDuckGo HTML backend.
    DuckDuckGo(DuckDuckGoProvider),
}

impl Provider {
    /// Build the configured provider with a client for its endpoint.
    ///
    /// A missing SerpApi key is not an error here; it surfaces when
    /// [`SearchProvider::search`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = http::build_client(config, ClientRole::Provider(config.provider))?;
        let provider = match config.provider {
            ProviderKind::SerpApi => Self::SerpApi(
                SerpApiProvider::new(config.serpapi_key.clone(), client)
                    .with_base_url(&config.serpapi_base_url),
            ),
            ProviderKind::DuckDuckGo => Self::DuckDuckGo(
                DuckDuckGoProvider::new(client).with_base_url(&config.duckduckgo_base_url),
            ),
        };
        Ok(provider)
    }
}

impl SearchProvider for Provider {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>, SearchError> {
        match self {
            Self::SerpApi(provider) => provider.search(query, count).await,
            Self::DuckDuckGo(provider) => provider.search(query, count).await,
        }
    }

    fn kind(&self) -> ProviderKind {
        match self {
            Self::SerpApi(_) => ProviderKind::SerpApi,
            Self::DuckDuckGo(_) => ProviderKind::DuckDuckGo,
        }
    }
}
