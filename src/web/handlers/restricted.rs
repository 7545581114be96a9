//! Page visible only to logged-in users.

use askama::Template;
use askama_web::WebTemplate;

use crate::web::middleware::CurrentUser;

#[derive(Template, WebTemplate)]
#[template(path = "restricted.html")]
pub struct RestrictedTemplate {
    pub user: Option<CurrentUser>,
}

/// # Endpoint
///
/// `GET /restricted`
pub async fn restricted_handler(user: CurrentUser) -> RestrictedTemplate {
    RestrictedTemplate { user: Some(user) }
}
