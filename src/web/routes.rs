//! HTML route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    about_handler, add_category_handler, add_category_page_handler, goto_handler, index_handler,
    like_category_handler, list_profiles_handler, login_handler, login_page_handler,
    logout_handler, profile_handler, register_handler, register_page_handler,
    register_profile_handler, register_profile_page_handler, restricted_handler,
    search_add_page_handler, search_category_handler, show_category_handler,
    suggest_category_handler, update_profile_handler,
};
use axum::{Router, routing::get};

/// Pages requiring a logged-in user.
///
/// Protected via [`crate::web::middleware::web_auth`]; anonymous requests
/// are redirected to the login page.
///
/// # Endpoints
///
/// - `GET|POST /add_category` - Add a category
/// - `GET /restricted` - Members-only page
/// - `GET|POST /register_profile` - Create the user's profile
/// - `GET|POST /profile/{username}` - View or update a profile
/// - `GET /profiles` - List every profile
/// - `GET /like_category` - Like a category, answers the new count
/// - `GET /search_add_page` - Add a search result to a category
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/add_category",
            get(add_category_page_handler).post(add_category_handler),
        )
        .route("/restricted", get(restricted_handler))
        .route(
            "/register_profile",
            get(register_profile_page_handler).post(register_profile_handler),
        )
        .route(
            "/profile/{username}",
            get(profile_handler).post(update_profile_handler),
        )
        .route("/profiles", get(list_profiles_handler))
        .route("/like_category", get(like_category_handler))
        .route("/search_add_page", get(search_add_page_handler))
}

/// Pages open to everyone.
///
/// # Endpoints
///
/// - `GET /` - Rankings, counts the session visit
/// - `GET /about` - Shows the session visit count
/// - `GET|POST /category/{slug}` - Category pages with optional web search
/// - `GET /goto` - Counted redirect to a page
/// - `GET /suggest` - Category suggestions fragment
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/about", get(about_handler))
        .route(
            "/category/{slug}",
            get(show_category_handler).post(search_category_handler),
        )
        .route("/goto", get(goto_handler))
        .route("/suggest", get(suggest_category_handler))
}

/// Sign-up, login and logout.
///
/// # Endpoints
///
/// - `GET|POST /register`
/// - `GET|POST /login`
/// - `GET /logout`
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page_handler).post(register_handler))
        .route("/login", get(login_page_handler).post(login_handler))
        .route("/logout", get(logout_handler))
}
