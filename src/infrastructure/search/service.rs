//! Search provider trait and error types.

use async_trait::async_trait;
use serde::Serialize;

/// One hit returned by a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub summary: String,
}

/// Errors that can occur while querying a search backend.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Search backend answered with status {0}")]
    Status(u16),
}

/// Trait for web search backends.
///
/// Callers treat failures as an empty result list; the category page must
/// keep rendering when the backend is down.
///
/// # Implementations
///
/// - [`crate::infrastructure::search::BingSearch`] - Bing Web Search v7
/// - [`crate::infrastructure::search::NullSearch`] - Always returns no results
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs `query` and returns the hits in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on transport failures or non-success statuses.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;

    /// Whether this provider can return results at all.
    fn is_enabled(&self) -> bool {
        true
    }
}
