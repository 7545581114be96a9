//! Registration, login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::forms::{FormErrors, LoginForm, RegisterForm, safe_next};
use crate::web::middleware::{CurrentUser, OptionalUser, SessionHandle};
use crate::web::redirect::found;

/// Where a new user lands after signing up.
pub const AFTER_REGISTER_URL: &str = "/register_profile/";

#[derive(Template, WebTemplate)]
#[template(path = "accounts/register.html")]
pub struct RegisterTemplate {
    pub user: Option<CurrentUser>,
    pub username: String,
    pub email: String,
    pub errors: FormErrors,
}

#[derive(Template, WebTemplate)]
#[template(path = "accounts/login.html")]
pub struct LoginTemplate {
    pub user: Option<CurrentUser>,
    pub username: String,
    pub next: String,
    pub errors: FormErrors,
}

#[derive(Debug, Deserialize)]
pub struct NextParams {
    pub next: Option<String>,
}

/// # Endpoint
///
/// `GET /accounts/register`
pub async fn register_page_handler(OptionalUser(user): OptionalUser) -> RegisterTemplate {
    RegisterTemplate {
        user,
        username: String::new(),
        email: String::new(),
        errors: FormErrors::new(),
    }
}

/// Creates an account, logs it in and continues to profile registration.
///
/// # Endpoint
///
/// `POST /accounts/register`
pub async fn register_handler(
    State(st): State<AppState>,
    session: SessionHandle,
    OptionalUser(user): OptionalUser,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let username = form.username.clone();
    let email = form.email.clone().unwrap_or_default();

    let cleaned = match form.clean() {
        Ok(cleaned) => cleaned,
        Err(errors) => {
            return Ok(RegisterTemplate {
                user,
                username,
                email,
                errors,
            }
            .into_response());
        }
    };

    let registered = st
        .auth_service
        .register(
            &cleaned.username,
            cleaned.email.as_deref().unwrap_or_default(),
            &cleaned.password1,
        )
        .await;

    match registered {
        Ok(new_user) => {
            session.login(new_user.id).await;
            Ok(found(AFTER_REGISTER_URL))
        }
        Err(AppError::Conflict { .. }) => {
            let mut errors = FormErrors::new();
            errors.add("username", "A user with that username already exists.");
            Ok(RegisterTemplate {
                user,
                username,
                email,
                errors,
            }
            .into_response())
        }
        Err(e) => Err(e),
    }
}

/// # Endpoint
///
/// `GET /accounts/login?next={path}`
pub async fn login_page_handler(
    OptionalUser(user): OptionalUser,
    Query(params): Query<NextParams>,
) -> LoginTemplate {
    LoginTemplate {
        user,
        username: String::new(),
        next: params.next.unwrap_or_default(),
        errors: FormErrors::new(),
    }
}

/// Checks credentials, rotates the session key and follows `next`.
///
/// Only local paths are followed; anything else goes home.
///
/// # Endpoint
///
/// `POST /accounts/login`
pub async fn login_handler(
    State(st): State<AppState>,
    session: SessionHandle,
    OptionalUser(user): OptionalUser,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match st
        .auth_service
        .authenticate(form.username.trim(), &form.password)
        .await
    {
        Ok(logged_in) => {
            session.login(logged_in.id).await;
            Ok(found(safe_next(form.next.as_deref())))
        }
        Err(e @ AppError::Unauthorized { .. }) => {
            let mut errors = FormErrors::new();
            errors.add_non_field(e.to_string());
            Ok(LoginTemplate {
                user,
                username: form.username,
                next: form.next.unwrap_or_default(),
                errors,
            }
            .into_response())
        }
        Err(e) => Err(e),
    }
}

/// Flushes the session and redirects home.
///
/// # Endpoint
///
/// `GET /accounts/logout`
pub async fn logout_handler(session: SessionHandle) -> Response {
    session.flush().await;
    found("/")
}
