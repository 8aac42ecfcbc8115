//! Gleaner: search a query, read the top pages, return a text report.
//!
//! This crate is the host around [`gleaner_search`]:
//! HTTP request → provider search → ad/tracking filter → page extraction → report
//!
//! # Architecture
//!
//! - **Config**: TOML file plus the `SERPAPI_KEY` environment variable,
//!   read once at startup
//! - **Server**: `axum` router exposing `GET /searchfor/{query}?limit=N`
//! - **Report**: fixed plain-text layout written to the output directory
//!   and returned as the response body

pub mod config;
pub mod error;
pub mod report;
pub mod server;

pub use config::GleanerConfig;
pub use error::{GleanerError, Result};
pub use report::{render_report, write_report};
pub use server::{AppState, router, run_server};
