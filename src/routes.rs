//! Top-level router configuration combining HTML pages, accounts and health.
//!
//! # Route Structure
//!
//! - `/`, `/about`, `/category/*`, `/goto`, `/suggest` - Public pages
//! - `/add_category`, `/profile/*`, `/profiles`, ... - Pages requiring login
//! - `/accounts/*`        - Register, login, logout
//! - `GET /health`        - Health check: DB, sessions, search (public)
//! - `/static/*`          - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Sessions** - Server-side session loaded from the `sessionid` cookie
//! - **Rate limiting** - Per-IP token bucket, stricter on account endpoints
//! - **Authentication** - Redirect to login for protected pages
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::{session, web_auth};
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds the router with all routes and middleware except path normalization.
///
/// Peer addresses must be available as connect info for rate limiting.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory served under `/static`
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    let protected = web::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        web_auth::layer,
    ));

    let pages = Router::new()
        .merge(web::routes::public_routes())
        .merge(protected)
        .layer(rate_limit::layer());

    let accounts = web::routes::account_routes().layer(rate_limit::secure_layer());

    let html = Router::new()
        .merge(pages)
        .nest("/accounts", accounts)
        .layer(middleware::from_fn_with_state(state.clone(), session::layer));

    Router::new()
        .merge(html)
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router, trimming trailing slashes before routing.
pub fn app_router(state: AppState, static_dir: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, static_dir))
}
