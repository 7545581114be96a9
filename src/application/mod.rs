//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::ranking_service::RankingService`] - Home page rankings
//! - [`services::category_service::CategoryService`] - Categories, likes and suggestions
//! - [`services::page_service::PageService`] - Counted visits and search-added pages
//! - [`services::profile_service::ProfileService`] - User profiles
//! - [`services::auth_service::AuthService`] - Registration and password login
//! - [`services::session_service::SessionService`] - Server-side sessions
//! - [`services::visit_tracker::VisitTracker`] - Per-session visit counting
//! - [`services::stats_service::StatsService`] - Aggregate counts

pub mod services;
