//! User profile management.

use std::sync::Arc;

use crate::domain::entities::{ProfileDetails, ProfileFields, UserProfile};
use crate::domain::repositories::{ProfileRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;

/// Service for user profiles.
pub struct ProfileService {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(users: Arc<dyn UserRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { users, profiles }
    }

    /// Saves the profile of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register_profile(
        &self,
        user_id: i64,
        fields: ProfileFields,
    ) -> Result<UserProfile, AppError> {
        let profile = self.profiles.upsert(user_id, fields).await?;
        tracing::info!(user_id, "Profile registered");
        Ok(profile)
    }

    /// Returns a user's profile, creating an empty one on first view.
    ///
    /// `Ok(None)` means no user has that username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn profile_for(&self, username: &str) -> Result<Option<ProfileDetails>, AppError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            return Ok(None);
        };

        let profile = self.profiles.get_or_create(user.id).await?;
        Ok(Some(ProfileDetails { user, profile }))
    }

    /// Replaces the profile fields of `username` on behalf of `actor_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has that username.
    /// Returns [`AppError::Forbidden`] if the actor does not own the profile.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_profile(
        &self,
        actor_id: i64,
        username: &str,
        fields: ProfileFields,
    ) -> Result<ProfileDetails, AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "username": username })))?;

        if user.id != actor_id {
            tracing::warn!(actor_id, owner_id = user.id, "Rejected profile update by non-owner");
            return Err(AppError::forbidden(
                "You can only edit your own profile",
                json!({ "username": username }),
            ));
        }

        let profile = self.profiles.upsert(user.id, fields).await?;
        Ok(ProfileDetails { user, profile })
    }

    /// Lists every profile with its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_profiles(&self) -> Result<Vec<ProfileDetails>, AppError> {
        self.profiles.list_with_users().await
    }
}
