//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Database and session store reachable
/// - **503 Service Unavailable**: One or more components degraded
///
/// Web search being disabled is reported but never degrades the status.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 5 categories" },
///     "sessions": { "status": "ok", "message": "3 active sessions" },
///     "search": { "status": "ok", "message": "Web search disabled" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let sessions_check = check_sessions(&state).await;

    let search_check = check_search(&state);

    let all_healthy = db_check.is_ok() && sessions_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            sessions: sessions_check,
            search: search_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity by counting categories.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.stats_service.count_categories().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {count} categories")),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    }
}

async fn check_sessions(state: &AppState) -> CheckStatus {
    match state.session_service.count_active().await {
        Ok(count) => CheckStatus::ok(format!("{count} active sessions")),
        Err(e) => CheckStatus::error(format!("Session store error: {e}")),
    }
}

fn check_search(state: &AppState) -> CheckStatus {
    if state.search.is_enabled() {
        CheckStatus::ok("Web search enabled")
    } else {
        CheckStatus::ok("Web search disabled")
    }
}
