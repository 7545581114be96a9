//! Shared application state injected into every handler.

use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, CategoryService, PageService, ProfileService, RankingService, SessionService,
    StatsService, VisitTracker,
};
use crate::domain::clock::Clock;
use crate::domain::repositories::{
    CategoryRepository, PageRepository, ProfileRepository, SessionRepository, UserRepository,
};
use crate::infrastructure::persistence::{
    PgCategoryRepository, PgPageRepository, PgProfileRepository, PgSessionRepository,
    PgUserRepository,
};
use crate::infrastructure::search::SearchProvider;

/// Repository implementations backing the services.
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepository>,
    pub pages: Arc<dyn PageRepository>,
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Repositories {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            pages: Arc::new(PgPageRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            profiles: Arc::new(PgProfileRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(pool)),
        }
    }
}

/// Session cookie and storage settings.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub secret: String,
    pub ttl: Duration,
    pub cookie_secure: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub ranking_service: Arc<RankingService>,
    pub category_service: Arc<CategoryService>,
    pub page_service: Arc<PageService>,
    pub profile_service: Arc<ProfileService>,
    pub auth_service: Arc<AuthService>,
    pub session_service: Arc<SessionService>,
    pub stats_service: Arc<StatsService>,
    pub visit_tracker: Arc<VisitTracker>,
    pub search: Arc<dyn SearchProvider>,
    pub cookie_secure: bool,
}

impl AppState {
    /// Wires every service on top of the given repositories.
    pub fn new(
        repos: Repositories,
        search: Arc<dyn SearchProvider>,
        clock: Arc<dyn Clock>,
        session: SessionSettings,
    ) -> Self {
        Self {
            ranking_service: Arc::new(RankingService::new(
                repos.categories.clone(),
                repos.pages.clone(),
            )),
            category_service: Arc::new(CategoryService::new(
                repos.categories.clone(),
                repos.pages.clone(),
            )),
            page_service: Arc::new(PageService::new(
                repos.categories.clone(),
                repos.pages.clone(),
            )),
            profile_service: Arc::new(ProfileService::new(
                repos.users.clone(),
                repos.profiles.clone(),
            )),
            auth_service: Arc::new(AuthService::new(repos.users.clone())),
            session_service: Arc::new(SessionService::new(
                repos.sessions.clone(),
                session.secret,
                session.ttl,
            )),
            stats_service: Arc::new(StatsService::new(
                repos.categories,
                repos.pages,
                repos.users,
                repos.sessions,
            )),
            visit_tracker: Arc::new(VisitTracker::new(clock)),
            search,
            cookie_secure: session.cookie_secure,
        }
    }
}
