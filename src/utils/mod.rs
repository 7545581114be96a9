//! Utility functions for slugs, URLs and session keys.
//!
//! This module provides helper functions used across the application:
//!
//! - [`slug`] - URL-safe slugs from category names
//! - [`url_normalizer`] - Page URL normalization and validation
//! - [`session_key`] - Random session cookie values

pub mod session_key;
pub mod slug;
pub mod url_normalizer;
