//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx prepared
//! statements. Rows are decoded through `FromRow` structs local to each module.
//!
//! # Repositories
//!
//! - [`PgCategoryRepository`] - Categories, likes and prefix search
//! - [`PgPageRepository`] - Pages and the counted redirect
//! - [`PgUserRepository`] - User accounts
//! - [`PgProfileRepository`] - User profiles
//! - [`PgSessionRepository`] - Server-side sessions

pub mod pg_category_repository;
pub mod pg_page_repository;
pub mod pg_profile_repository;
pub mod pg_session_repository;
pub mod pg_user_repository;

pub use pg_category_repository::PgCategoryRepository;
pub use pg_page_repository::PgPageRepository;
pub use pg_profile_repository::PgProfileRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;
