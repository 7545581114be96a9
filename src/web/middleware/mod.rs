//! Web-specific middleware: sessions and login enforcement.

pub mod session;
pub mod web_auth;

pub use session::{SESSION_COOKIE, SessionHandle};
pub use web_auth::{CurrentUser, OptionalUser};
