//! Configuration for the report service.
//!
//! Loaded from a TOML file when one is given, otherwise defaults. The
//! SerpApi key is never read from the file; [`GleanerConfig::apply_env`]
//! copies it from `SERPAPI_KEY` once at startup and it is passed explicitly
//! from there on.

use gleaner_search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GleanerError, Result};

/// Environment variable holding the SerpApi key.
pub const SERPAPI_KEY_ENV: &str = "SERPAPI_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GleanerConfig {
    /// HTTP listener and report output settings.
    pub server: ServerConfig,
    /// Provider, extraction and filter settings.
    pub search: SearchConfig,
}

/// HTTP listener and report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory reports are written to. Created on demand.
    pub output_dir: PathBuf,
    /// Result count used when a request has no `limit`.
    pub default_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 1234,
            output_dir: PathBuf::from("output"),
            default_limit: 3,
        }
    }
}

impl GleanerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| GleanerError::Config(e.to_string()))
    }

    /// Fill the SerpApi key from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Fill the SerpApi key using `lookup` in place of the process environment.
    ///
    /// Blank values are ignored. A key already present is overwritten.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(SERPAPI_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.search.serpapi_key = Some(key.trim().to_owned());
        }
    }

    /// Validates the whole configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GleanerError::Config`] for a zero default limit, a default
    /// limit above `search.max_limit` or an empty host, and wraps search
    /// config errors.
    pub fn validate(&self) -> Result<()> {
        if self.server.default_limit == 0 {
            return Err(GleanerError::Config(
                "server.default_limit must be greater than 0".into(),
            ));
        }
        if self.server.default_limit > self.search.max_limit {
            return Err(GleanerError::Config(format!(
                "server.default_limit must not exceed search.max_limit ({})",
                self.search.max_limit
            )));
        }
        if self.server.host.trim().is_empty() {
            return Err(GleanerError::Config("server.host must not be empty".into()));
        }
        self.search.validate()?;
        Ok(())
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
