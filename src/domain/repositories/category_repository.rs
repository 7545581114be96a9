//! Repository trait for category data access.

use crate::domain::entities::{Category, NewCategory};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing categories.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCategoryRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_category.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Creates a new category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name or the derived slug already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_category: NewCategory) -> Result<Category, AppError>;

    /// Finds a category by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError>;

    /// Finds a category by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, AppError>;

    /// Finds a category by its exact name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError>;

    /// Returns up to `limit` categories ordered by likes, highest first.
    ///
    /// Ties are ordered by ascending id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn top_by_likes(&self, limit: i64) -> Result<Vec<Category>, AppError>;

    /// Returns every category ordered by likes, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_likes(&self) -> Result<Vec<Category>, AppError>;

    /// Returns categories whose name starts with `prefix`, ignoring case.
    ///
    /// `limit` caps the number of rows when present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name_prefix(
        &self,
        prefix: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Category>, AppError>;

    /// Atomically adds one like and returns the new total.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(likes))` if the category exists
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_likes(&self, id: i64) -> Result<Option<i32>, AppError>;

    /// Renames a category, re-deriving its slug.
    ///
    /// Only the name and slug of `renamed` are applied; counters are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new name or slug is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn rename(&self, id: i64, renamed: NewCategory) -> Result<Option<Category>, AppError>;

    /// Counts all categories.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
