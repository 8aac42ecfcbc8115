//! HTTP front end: `GET /searchfor/{query}?limit=N` returns a text report.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use gleaner_search::{AggregateOptions, Extractor, FilterConfig, Provider, SearchError, aggregate};

use crate::config::GleanerConfig;
use crate::error::{GleanerError, Result};
use crate::report::{persist_report, render_report, report_file_name};

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    provider: Arc<Provider>,
    extractor: Extractor,
    filter: Arc<FilterConfig>,
    options: AggregateOptions,
    output_dir: Arc<PathBuf>,
    default_limit: usize,
}

impl AppState {
    /// Build the provider, extractor and output settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or an HTTP client
    /// cannot be built.
    pub fn from_config(config: &GleanerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider: Arc::new(Provider::from_config(&config.search)?),
            extractor: Extractor::from_config(&config.search)?,
            filter: Arc::new(config.search.filter.clone()),
            options: config.search.aggregate_options(),
            output_dir: Arc::new(config.server.output_dir.clone()),
            default_limit: config.server.default_limit,
        })
    }
}

#[derive(Debug, serde::Deserialize)]
struct SearchParams {
    limit: Option<usize>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/searchfor/{query}", get(search_for))
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the address cannot be
/// bound, or the server fails.
pub async fn run_server(config: GleanerConfig) -> Result<()> {
    let state = AppState::from_config(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        provider = %config.search.provider,
        output_dir = %config.server.output_dir.display(),
        "gleaner listening on http://{local_addr}"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("received Ctrl+C, shutting down...");
            }
        })
        .await
        .map_err(|e| GleanerError::Server(e.to_string()))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

async fn search_for(
    State(state): State<AppState>,
    Path(query): Path<String>,
    Query(params): Query<SearchParams>,
) -> Response {
    let limit = params.limit.unwrap_or(state.default_limit);
    tracing::debug!(query = %query, limit, "report requested");

    let results = match aggregate(
        state.provider.as_ref(),
        &state.extractor,
        &state.filter,
        &query,
        limit,
        &state.options,
    )
    .await
    {
        Ok(results) => results,
        Err(err) => return search_error_response(&err),
    };

    let body = render_report(&results);
    let file_name = report_file_name(&query);

    let output_dir = Arc::clone(&state.output_dir);
    let to_write = body.clone();
    let written =
        tokio::task::spawn_blocking(move || persist_report(&output_dir, &query, &to_write)).await;
    match written {
        Ok(Ok(_)) => {}
        Ok(Err(err)) => return internal_error(&err.to_string()),
        Err(err) => return internal_error(&format!("report writer panicked: {err}")),
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

fn search_error_response(err: &SearchError) -> Response {
    let status = match err {
        SearchError::Config(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    };
    tracing::warn!(error = %err, %status, "report request failed");
    (status, Json(serde_json::json!({"error": err.to_string()}))).into_response()
}

fn internal_error(message: &str) -> Response {
    tracing::error!(error = message, "report could not be written");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": message})),
    )
        .into_response()
}
