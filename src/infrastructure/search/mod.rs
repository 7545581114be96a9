//! Web search used to discover pages for a category.
//!
//! Provides a [`SearchProvider`] trait with two implementations:
//! - [`BingSearch`] - Bing Web Search API client
//! - [`NullSearch`] - No-op provider used when no API key is configured

mod bing_search;
mod null_search;
mod service;

pub use bing_search::BingSearch;
pub use null_search::NullSearch;
pub use service::{SearchError, SearchProvider, SearchResult};
