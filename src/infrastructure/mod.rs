//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and web search.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`search`] - Web search providers (Bing and no-op implementations)

pub mod persistence;
pub mod search;
