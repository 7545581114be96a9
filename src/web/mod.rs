//! Browser-facing HTML layer.
//!
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`forms`] - Form schemas and field errors
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Sessions and login enforcement
//! - [`redirect`] - `302 Found` helper
//! - [`routes`] - Route groups

pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod redirect;
pub mod routes;
