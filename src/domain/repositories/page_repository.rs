//! Repository trait for page data access.

use crate::domain::entities::{NewPage, Page};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing pages and their view counters.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPageRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_page.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Creates a new page with zero views.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the category does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_page: NewPage) -> Result<Page, AppError>;

    /// Finds a page by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Page>, AppError>;

    /// Returns the page matching category, title and URL exactly, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the category does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_or_create(&self, new_page: NewPage) -> Result<Page, AppError>;

    /// Lists a category's pages ordered by views, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_category(&self, category_id: i64) -> Result<Vec<Page>, AppError>;

    /// Returns up to `limit` pages ordered by views, highest first.
    ///
    /// Ties are ordered by ascending id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn top_by_views(&self, limit: i64) -> Result<Vec<Page>, AppError>;

    /// Atomically adds one view and stamps `last_visit` with the current time.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Page))` with the updated counters if the page exists
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_visit(&self, id: i64) -> Result<Option<Page>, AppError>;

    /// Counts all pages.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
