//! `302 Found` redirects.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

/// Redirects with `302 Found`.
///
/// A location that is not a valid header value falls back to `/`.
pub fn found(location: &str) -> Response {
    let value = HeaderValue::from_str(location).unwrap_or_else(|_| {
        tracing::warn!(location, "Invalid redirect location, sending home");
        HeaderValue::from_static("/")
    });

    (StatusCode::FOUND, [(header::LOCATION, value)]).into_response()
}
