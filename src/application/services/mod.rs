//! Business logic services for the application layer.

pub mod auth_service;
pub mod category_service;
pub mod page_service;
pub mod profile_service;
pub mod ranking_service;
pub mod session_service;
pub mod stats_service;
pub mod visit_tracker;

pub use auth_service::AuthService;
pub use category_service::{CategoryDetails, CategoryService};
pub use page_service::PageService;
pub use profile_service::ProfileService;
pub use ranking_service::{RankingService, Rankings};
pub use session_service::{SessionCookie, SessionService};
pub use stats_service::{SiteStats, StatsService};
pub use visit_tracker::{VisitState, VisitTracker};
