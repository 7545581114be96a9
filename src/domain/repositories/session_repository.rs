//! Repository trait for server-side sessions.

use crate::domain::entities::SessionData;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for session storage.
///
/// Sessions are addressed by the HMAC of the cookie value; raw session keys
/// never reach the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads an unexpired session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn load(&self, session_hash: &str) -> Result<Option<SessionData>, AppError>;

    /// Inserts or replaces a session and extends its expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(
        &self,
        session_hash: &str,
        data: &SessionData,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Deletes a session if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, session_hash: &str) -> Result<(), AppError>;

    /// Deletes every expired session and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn purge_expired(&self) -> Result<u64, AppError>;

    /// Counts unexpired sessions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_active(&self) -> Result<i64, AppError>;
}
