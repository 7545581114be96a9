//! Server-side session middleware.
//!
//! Loads the session named by the `sessionid` cookie before the handler
//! runs, exposes it through [`SessionHandle`], and persists it once the
//! handler has produced a response.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::services::{SessionCookie, VisitState, VisitTracker};
use crate::domain::entities::Session;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sessionid";

/// Per-request access to the current session.
///
/// Cloning shares the same session; all mutation goes through the lock so
/// the middleware sees every change when it persists.
#[derive(Clone)]
pub struct SessionHandle(Arc<Mutex<Session>>);

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    /// Id of the logged-in user, if any.
    pub async fn user_id(&self) -> Option<i64> {
        self.0.lock().await.user_id()
    }

    /// Stored visit counter without tracking a new visit.
    pub async fn visits(&self) -> Option<i64> {
        self.0.lock().await.visits()
    }

    /// Runs the visit tracker on the stored values and writes the result back.
    pub async fn track_visit(&self, tracker: &VisitTracker) -> VisitState {
        let mut session = self.0.lock().await;
        let state = tracker.track(session.visits(), session.last_visit());
        session.set_visit_state(state.visits, state.last_visit.clone());
        state
    }

    /// Binds the session to `user_id` under a fresh key.
    pub async fn login(&self, user_id: i64) {
        self.0.lock().await.login(user_id);
    }

    /// Clears the session, logging the user out.
    pub async fn flush(&self) {
        self.0.lock().await.flush();
    }
}

impl<S> FromRequestParts<S> for SessionHandle
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionHandle>()
            .cloned()
            .ok_or_else(|| AppError::internal("Session layer is not installed", json!({})))
    }
}

/// Loads, exposes and persists the session around every request.
///
/// A failure to persist is logged and the handler's response is still
/// returned; the session simply is not saved for this request.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(index))
///     .layer(middleware::from_fn_with_state(state.clone(), session::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let key = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

    let session = match st.session_service.load(key.as_deref()).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };

    let handle = SessionHandle::new(session);
    req.extensions_mut().insert(handle.clone());

    let response = next.run(req).await;

    let mut session = handle.0.lock().await;
    match st.session_service.persist(&mut session).await {
        Ok(SessionCookie::Unchanged) => response,
        Ok(SessionCookie::Set(key)) => {
            let cookie = Cookie::build((SESSION_COOKIE, key))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(st.cookie_secure);
            (jar.add(cookie), response).into_response()
        }
        Ok(SessionCookie::Clear) => {
            let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
            (jar, response).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "Failed to persist session");
            response
        }
    }
}
