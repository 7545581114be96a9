//! Account registration and password authentication.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use tracing::instrument;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;

/// Hashes a password into an Argon2 PHC string.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))
}

/// Service for user accounts.
///
/// Passwords are stored as Argon2 hashes and never leave this service.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is taken.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict(
                "A user with that username already exists",
                json!({ "constraint": "users_username_key" }),
            ));
        }

        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
            })
            .await?;

        metrics::counter!("rango_registrations_total").increment(1);
        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Checks a username and password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown user or a wrong password.
    /// Returns [`AppError::Internal`] on database errors or a corrupt stored hash.
    #[instrument(name = "AuthService: login attempt", skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let Some(credentials) = self.users.find_credentials(username).await? else {
            tracing::warn!("Login failed: user not found");
            return Err(invalid_credentials());
        };

        let parsed_hash = PasswordHash::new(&credentials.password_hash).map_err(|e| {
            AppError::internal(
                "Stored password hash is malformed",
                json!({ "user_id": credentials.user.id, "reason": e.to_string() }),
            )
        })?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_err()
        {
            tracing::warn!("Login failed: wrong password");
            return Err(invalid_credentials());
        }

        metrics::counter!("rango_logins_total").increment(1);
        tracing::info!(user_id = credentials.user.id, "User authenticated");
        Ok(credentials.user)
    }

    /// Loads the user bound to a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_user(&self, id: i64) -> Result<Option<User>, AppError> {
        self.users.find_by_id(id).await
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(
        "Please enter a correct username and password.",
        json!({ "reason": "invalid_credentials" }),
    )
}
