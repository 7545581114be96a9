//! Repository trait for user profiles.

use crate::domain::entities::{ProfileDetails, ProfileFields, UserProfile};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for one-to-one user profiles.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProfileRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds the profile of a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<UserProfile>, AppError>;

    /// Returns the user's profile, creating an empty one if absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_or_create(&self, user_id: i64) -> Result<UserProfile, AppError>;

    /// Creates or replaces the user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert(&self, user_id: i64, fields: ProfileFields) -> Result<UserProfile, AppError>;

    /// Lists every profile with its owner, ordered by username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_with_users(&self) -> Result<Vec<ProfileDetails>, AppError>;
}
