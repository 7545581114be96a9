//! Home and about pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::domain::entities::{Category, Page};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::{CurrentUser, OptionalUser, SessionHandle};

/// Home page with the most liked categories and most viewed pages.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub user: Option<CurrentUser>,
    pub categories: Vec<Category>,
    pub pages: Vec<Page>,
    pub visits: i64,
}

#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub user: Option<CurrentUser>,
    pub visits: i64,
}

/// Renders the home page and counts the visit.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(
    State(st): State<AppState>,
    session: SessionHandle,
    OptionalUser(user): OptionalUser,
) -> Result<IndexTemplate, AppError> {
    let rankings = st.ranking_service.home_rankings().await?;
    let visit = session.track_visit(&st.visit_tracker).await;

    Ok(IndexTemplate {
        user,
        categories: rankings.categories,
        pages: rankings.pages,
        visits: visit.visits,
    })
}

/// Renders the about page with the stored visit count.
///
/// Viewing this page does not count as a visit.
///
/// # Endpoint
///
/// `GET /about`
pub async fn about_handler(
    session: SessionHandle,
    OptionalUser(user): OptionalUser,
) -> AboutTemplate {
    AboutTemplate {
        user,
        visits: session.visits().await.unwrap_or(0),
    }
}
