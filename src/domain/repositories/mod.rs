//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`CategoryRepository`] - Categories, likes and prefix lookups
//! - [`PageRepository`] - Pages and view counting
//! - [`UserRepository`] - Accounts and credentials
//! - [`ProfileRepository`] - User profiles
//! - [`SessionRepository`] - Server-side session storage
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod category_repository;
pub mod page_repository;
pub mod profile_repository;
pub mod session_repository;
pub mod user_repository;

pub use category_repository::CategoryRepository;
pub use page_repository::PageRepository;
pub use profile_repository::ProfileRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use page_repository::MockPageRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
