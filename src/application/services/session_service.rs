//! Server-side session loading and persistence.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{Session, SessionData};
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;
use crate::utils::session_key::generate_session_key;

type HmacSha256 = Hmac<Sha256>;

/// What the response should do with the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCookie {
    /// Nothing was written; leave the cookie alone.
    Unchanged,
    /// The session was saved under this key.
    Set(String),
    /// The session was emptied; remove the cookie.
    Clear,
}

/// Service for loading and saving sessions.
///
/// Session keys are hashed with HMAC-SHA256 (keyed by `signing_secret`)
/// before they reach the store. A leaked sessions table cannot be replayed
/// as cookies without the server-side secret.
pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
    signing_secret: String,
    ttl: Duration,
}

impl SessionService {
    /// Creates a new session service.
    ///
    /// # Arguments
    ///
    /// - `repository` - session store
    /// - `signing_secret` - HMAC key for session key hashing
    /// - `ttl` - lifetime of a session after its last save
    pub fn new(repository: Arc<dyn SessionRepository>, signing_secret: String, ttl: Duration) -> Self {
        Self {
            repository,
            signing_secret,
            ttl,
        }
    }

    /// Hashes a raw session key with HMAC-SHA256 using the server secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_key(&self, key: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(key.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Loads the session for a cookie value.
    ///
    /// Unknown or expired keys yield a fresh session, which gets a new key
    /// when first saved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn load(&self, key: Option<&str>) -> Result<Session, AppError> {
        let Some(key) = key.filter(|k| !k.is_empty()) else {
            return Ok(Session::new());
        };

        match self.repository.load(&self.hash_key(key)).await? {
            Some(data) => Ok(Session::existing(key.to_string(), data)),
            None => {
                tracing::debug!("Session key not found or expired, starting fresh");
                Ok(Session::new())
            }
        }
    }

    /// Persists a session if it changed.
    ///
    /// Rotated keys are deleted from the store. An emptied session without a
    /// key is not written at all.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database or randomness errors.
    pub async fn persist(&self, session: &mut Session) -> Result<SessionCookie, AppError> {
        if !session.is_modified() {
            return Ok(SessionCookie::Unchanged);
        }

        if let Some(stale) = session.stale_key() {
            self.repository.delete(&self.hash_key(stale)).await?;
        }

        if session.key().is_none() && session.data() == &SessionData::default() {
            return Ok(SessionCookie::Clear);
        }

        let key = match session.key() {
            Some(existing) => existing.to_string(),
            None => generate_session_key()?,
        };

        let expires_at = Utc::now() + self.ttl;
        self.repository
            .save(&self.hash_key(&key), session.data(), expires_at)
            .await?;

        session.mark_saved(key.clone());
        Ok(SessionCookie::Set(key))
    }

    /// Removes expired sessions from the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let removed = self.repository.purge_expired().await?;
        if removed > 0 {
            tracing::info!(removed, "Purged expired sessions");
        }
        Ok(removed)
    }

    /// Counts unexpired sessions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_active(&self) -> Result<i64, AppError> {
        self.repository.count_active().await
    }
}
