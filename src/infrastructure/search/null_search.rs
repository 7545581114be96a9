//! No-op search provider.

use super::service::{SearchError, SearchProvider, SearchResult};
use async_trait::async_trait;
use tracing::debug;

/// A search provider that never returns results.
///
/// Used when `BING_API_KEY` is unset so the category page still renders its
/// search form without reaching out to the network.
pub struct NullSearch;

impl NullSearch {
    /// Creates a new NullSearch instance.
    pub fn new() -> Self {
        debug!("Using NullSearch (web search disabled)");
        Self
    }
}

impl Default for NullSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for NullSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, SearchError> {
        Ok(Vec::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
