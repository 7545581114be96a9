//! Core domain entities representing the directory's data model.
//!
//! Entities are plain data structures; the only behaviour they carry is the
//! invariant-preserving construction of new records.
//!
//! # Entity Types
//!
//! - [`Category`] - A named, sluggable grouping of pages ranked by likes
//! - [`Page`] - An external link inside a category ranked by views
//! - [`User`] - A registered account
//! - [`UserProfile`] - Optional public details attached to a user
//! - [`Session`] / [`SessionData`] - Per-browser session state
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewCategory`, `NewPage`, `NewUser` - For creating new records
//! - `ProfileFields` - For upserting profile details

pub mod category;
pub mod page;
pub mod profile;
pub mod session;
pub mod user;

pub use category::{Category, NewCategory};
pub use page::{NewPage, Page};
pub use profile::{ProfileDetails, ProfileFields, UserProfile};
pub use session::{Session, SessionData};
pub use user::{NewUser, User, UserCredentials};
