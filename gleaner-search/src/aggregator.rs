//! Result aggregation: search → filter → canonicalise → extract → collect.
//!
//! Hits are processed one at a time in provider rank order. Only a provider
//! failure aborts the run; a page that cannot be fetched or yields no text
//! is skipped.

use crate::config::FilterConfig;
use crate::content::Extractor;
use crate::error::SearchError;
use crate::filter::{canonicalize, is_ad_or_tracking};
use crate::provider::SearchProvider;
use crate::types::{ExtractedContent, ResultSet};

/// Knobs for a single aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Raw hits requested per wanted result.
    pub oversample_factor: usize,
    /// Character budget per extracted page.
    pub max_chars: usize,
    /// Minimum extracted length to accept a page. 0 accepts any non-empty text.
    pub min_content_chars: usize,
    /// Largest `limit` a caller may ask for.
    pub max_limit: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            oversample_factor: 3,
            max_chars: 2000,
            min_content_chars: 0,
            max_limit: 20,
        }
    }
}

/// Why a hit was not accepted. Used for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    EmptyUrl,
    AdOrTracking,
    NoContent,
}

/// Collect up to `limit` extracted pages for `query`.
///
/// # Pipeline
///
/// 1. Ask `provider` for `limit * oversample_factor` hits
/// 2. Drop hits with an empty URL or an ad/tracking URL
/// 3. Canonicalise the URL (the canonical form is re-checked by the classifier)
/// 4. Extract up to `max_chars` of text; drop hits with too little
/// 5. Stop at `limit` accepted results or when hits run out
///
/// # Errors
///
/// Returns [`SearchError::Config`] for a `limit` of zero or above
/// `max_limit`, zero oversampling or a blank query, and passes provider
/// errors through unchanged.
pub async fn aggregate<P: SearchProvider>(
    provider: &P,
    extractor: &Extractor,
    filter: &FilterConfig,
    query: &str,
    limit: usize,
    options: &AggregateOptions,
) -> Result<ResultSet, SearchError> {
    if limit == 0 {
        return Err(SearchError::Config("limit must be greater than 0".into()));
    }
    if limit > options.max_limit {
        return Err(SearchError::Config(format!(
            "limit must be at most {}",
            options.max_limit
        )));
    }
    if options.oversample_factor == 0 {
        return Err(SearchError::Config(
            "oversample_factor must be greater than 0".into(),
        ));
    }
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::Config("query must not be empty".into()));
    }

    let fetch_count = limit.saturating_mul(options.oversample_factor);
    tracing::debug!(query, limit, fetch_count, provider = %provider.kind(), "aggregating");

    let hits = provider.search(query, fetch_count).await?;
    let hit_count = hits.len();

    let mut results: ResultSet = Vec::with_capacity(limit.min(hit_count));
    let mut skipped = 0usize;

    for hit in hits {
        if results.len() >= limit {
            break;
        }

        let accepted = accept_hit(&hit.url, extractor, filter, options).await;
        match accepted {
            Ok((url, content)) => results.push(ExtractedContent {
                title: hit.title,
                url,
                content,
            }),
            Err(reason) => {
                skipped += 1;
                tracing::debug!(url = %hit.url, ?reason, "hit skipped");
            }
        }
    }

    tracing::info!(
        provider = %provider.kind(),
        hits = hit_count,
        accepted = results.len(),
        skipped,
        "aggregation complete"
    );
    Ok(results)
}

async fn accept_hit(
    raw_url: &str,
    extractor: &Extractor,
    filter: &FilterConfig,
    options: &AggregateOptions,
) -> Result<(String, String), Skip> {
    if raw_url.trim().is_empty() {
        return Err(Skip::EmptyUrl);
    }
    if is_ad_or_tracking(raw_url, filter) {
        return Err(Skip::AdOrTracking);
    }

    let url = canonicalize(raw_url);
    if url != raw_url && is_ad_or_tracking(&url, filter) {
        return Err(Skip::AdOrTracking);
    }

    let content = extractor.extract(&url, options.max_chars).await;
    if content.is_empty() || content.chars().count() < options.min_content_chars {
        return Err(Skip::NoContent);
    }
    Ok((url, content))
}
