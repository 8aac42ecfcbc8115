//! Gleaner report server binary.

use clap::Parser;
use gleaner::GleanerConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Gleaner: search the web and return readable article text as a report.
#[derive(Parser)]
#[command(name = "gleaner", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, env = "GLEANER_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind (overrides the config file).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see per-page decisions.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gleaner=info,gleaner_search=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = if let Some(ref path) = cli.config {
        GleanerConfig::from_file(path)?
    } else {
        GleanerConfig::default()
    };
    config.apply_env();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if config.search.provider == gleaner_search::ProviderKind::SerpApi
        && config.search.serpapi_key.is_none()
    {
        tracing::warn!("SERPAPI_KEY is not set; searches will fail until it is provided");
    }

    gleaner::run_server(config).await.map_err(|e| {
        tracing::error!(error = %e, "gleaner exited with error");
        anyhow::anyhow!("gleaner failed: {e}")
    })?;

    tracing::info!("gleaner shut down cleanly");
    Ok(())
}
