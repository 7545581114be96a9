//! Session-based authentication for the HTML pages.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::session::SessionHandle;
use crate::web::redirect::found;

/// Path of the login page.
pub const LOGIN_URL: &str = "/accounts/login/";

/// The logged-in user, as shown in templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// Resolves the session's user id to a user.
///
/// A session pointing at a deleted user counts as anonymous.
pub async fn resolve_user(
    st: &AppState,
    session: &SessionHandle,
) -> Result<Option<CurrentUser>, AppError> {
    let Some(user_id) = session.user_id().await else {
        return Ok(None);
    };

    Ok(st
        .auth_service
        .find_user(user_id)
        .await?
        .map(|user| CurrentUser {
            id: user.id,
            username: user.username,
        }))
}

/// Builds the login URL that returns to `path_and_query` afterwards.
pub fn login_redirect_url(path_and_query: &str) -> String {
    let next: String = url::form_urlencoded::byte_serialize(path_and_query.as_bytes()).collect();
    format!("{LOGIN_URL}?next={next}")
}

/// Requires a logged-in user.
///
/// # Authentication Flow
///
/// 1. Read the user id from the session
/// 2. Load the user via [`crate::application::services::AuthService`]
/// 3. On success, insert [`CurrentUser`] into the request extensions
/// 4. Otherwise redirect to the login page with `next` set to the
///    requested path
///
/// Unlike an API guard returning `401 Unauthorized`, this middleware
/// redirects so a browser lands on the login form.
pub async fn layer(
    State(st): State<AppState>,
    session: SessionHandle,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    match resolve_user(&st, &session).await? {
        Some(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None => {
            let target = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            tracing::debug!(path = target, "Anonymous request to protected page");
            Ok(found(&login_redirect_url(target)))
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Login required", json!({})))
    }
}

/// The logged-in user on pages that do not require one.
pub struct OptionalUser(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(OptionalUser(Some(user.clone())));
        }

        let session = SessionHandle::from_request_parts(parts, state).await?;
        Ok(OptionalUser(resolve_user(state, &session).await?))
    }
}
