//! Search provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::SearchProvider`].

pub mod duckduckgo;
pub mod serpapi;

pub use duckduckgo::DuckDuckGoProvider;
pub use serpapi::SerpApiProvider;
