//! Profile registration, viewing, editing and listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::domain::entities::ProfileDetails;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::forms::{FormErrors, UserProfileForm};
use crate::web::middleware::CurrentUser;
use crate::web::redirect::found;

#[derive(Template, WebTemplate)]
#[template(path = "profile_registration.html")]
pub struct ProfileRegistrationTemplate {
    pub user: Option<CurrentUser>,
    pub form: UserProfileForm,
    pub errors: FormErrors,
}

#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub user: Option<CurrentUser>,
    pub details: ProfileDetails,
    pub is_owner: bool,
    pub form: UserProfileForm,
    pub errors: FormErrors,
}

#[derive(Template, WebTemplate)]
#[template(path = "list_profiles.html")]
pub struct ProfileListTemplate {
    pub user: Option<CurrentUser>,
    pub profiles: Vec<ProfileDetails>,
}

/// Shows the empty profile form.
///
/// # Endpoint
///
/// `GET /register_profile`
pub async fn register_profile_page_handler(user: CurrentUser) -> ProfileRegistrationTemplate {
    ProfileRegistrationTemplate {
        user: Some(user),
        form: UserProfileForm::default(),
        errors: FormErrors::new(),
    }
}

/// Saves the logged-in user's profile and redirects home.
///
/// # Endpoint
///
/// `POST /register_profile`
pub async fn register_profile_handler(
    State(st): State<AppState>,
    user: CurrentUser,
    Form(form): Form<UserProfileForm>,
) -> Result<Response, AppError> {
    let fields = match form.clone().clean() {
        Ok(fields) => fields,
        Err(errors) => {
            return Ok(ProfileRegistrationTemplate {
                user: Some(user),
                form,
                errors,
            }
            .into_response());
        }
    };

    st.profile_service.register_profile(user.id, fields).await?;
    Ok(found("/"))
}

/// Shows a user's profile, creating an empty one on first view.
///
/// Unknown usernames redirect home.
///
/// # Endpoint
///
/// `GET /profile/{username}`
pub async fn profile_handler(
    State(st): State<AppState>,
    Path(username): Path<String>,
    user: CurrentUser,
) -> Result<Response, AppError> {
    let Some(details) = st.profile_service.profile_for(&username).await? else {
        return Ok(found("/"));
    };

    let form = UserProfileForm::from_fields(
        details.profile.website.clone(),
        details.profile.picture.clone(),
    );
    let is_owner = details.user.id == user.id;

    Ok(ProfileTemplate {
        user: Some(user),
        details,
        is_owner,
        form,
        errors: FormErrors::new(),
    }
    .into_response())
}

/// Updates a profile. Only its owner may do so; an unknown username
/// redirects home.
///
/// # Endpoint
///
/// `POST /profile/{username}`
pub async fn update_profile_handler(
    State(st): State<AppState>,
    Path(username): Path<String>,
    user: CurrentUser,
    Form(form): Form<UserProfileForm>,
) -> Result<Response, AppError> {
    let fields = match form.clone().clean() {
        Ok(fields) => fields,
        Err(errors) => {
            let Some(details) = st.profile_service.profile_for(&username).await? else {
                return Ok(found("/"));
            };
            let is_owner = details.user.id == user.id;
            return Ok(ProfileTemplate {
                user: Some(user),
                details,
                is_owner,
                form,
                errors,
            }
            .into_response());
        }
    };

    match st
        .profile_service
        .update_profile(user.id, &username, fields)
        .await
    {
        Ok(details) => Ok(found(&profile_url(&details.user.username))),
        Err(AppError::NotFound { .. }) => Ok(found("/")),
        Err(e) => Err(e),
    }
}

/// Lists every profile.
///
/// # Endpoint
///
/// `GET /profiles`
pub async fn list_profiles_handler(
    State(st): State<AppState>,
    user: CurrentUser,
) -> Result<ProfileListTemplate, AppError> {
    let profiles = st.profile_service.list_profiles().await?;

    Ok(ProfileListTemplate {
        user: Some(user),
        profiles,
    })
}

/// Profile path for `username`, percent-encoded.
pub fn profile_url(username: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(username.as_bytes()).collect();
    format!("/profile/{encoded}/")
}
