//! Site-wide counts for the admin tool and health checks.

use std::sync::Arc;

use crate::domain::repositories::{
    CategoryRepository, PageRepository, SessionRepository, UserRepository,
};
use crate::error::AppError;

/// Row counts across the main tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteStats {
    pub categories: i64,
    pub pages: i64,
    pub users: i64,
    pub active_sessions: i64,
}

/// Service for aggregate statistics.
pub struct StatsService {
    categories: Arc<dyn CategoryRepository>,
    pages: Arc<dyn PageRepository>,
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        pages: Arc<dyn PageRepository>,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            categories,
            pages,
            users,
            sessions,
        }
    }

    /// Counts categories, pages, users and unexpired sessions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn site_stats(&self) -> Result<SiteStats, AppError> {
        Ok(SiteStats {
            categories: self.categories.count().await?,
            pages: self.pages.count().await?,
            users: self.users.count().await?,
            active_sessions: self.sessions.count_active().await?,
        })
    }

    /// Counts categories; doubles as a cheap database round trip.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_categories(&self) -> Result<i64, AppError> {
        self.categories.count().await
    }
}
