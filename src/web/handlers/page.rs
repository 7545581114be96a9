//! Counted redirects and pages added from search results.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::domain::entities::Page;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::redirect::found;

/// Page list fragment returned after adding a search result.
#[derive(Template, WebTemplate)]
#[template(path = "page_listing.html")]
pub struct PageListingTemplate {
    pub pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
pub struct GotoParams {
    pub page_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchAddParams {
    pub category_id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

/// Counts a visit and redirects to the page's URL.
///
/// Missing, malformed and unknown ids all redirect home.
///
/// # Endpoint
///
/// `GET /goto?page_id={id}`
pub async fn goto_handler(
    State(st): State<AppState>,
    Query(params): Query<GotoParams>,
) -> Result<Response, AppError> {
    match st.page_service.visit_page(params.page_id.as_deref()).await {
        Ok(page) => Ok(found(&page.url)),
        Err(e @ (AppError::Validation { .. } | AppError::NotFound { .. })) => {
            tracing::info!(kind = e.kind(), details = %e.details(), "Page visit rejected");
            Ok(found("/"))
        }
        Err(e) => Err(e),
    }
}

/// Adds a search result to a category and renders the category's pages.
///
/// Input problems answer a short plain-text message instead of the listing.
///
/// # Endpoint
///
/// `GET /search_add_page?category_id={id}&title={title}&url={url}`
pub async fn search_add_page_handler(
    State(st): State<AppState>,
    Query(params): Query<SearchAddParams>,
) -> Result<Response, AppError> {
    let added = st
        .page_service
        .search_add_page(
            params.category_id.as_deref(),
            params.title.as_deref(),
            params.url.as_deref(),
        )
        .await;

    match added {
        Ok(pages) => Ok(PageListingTemplate { pages }.into_response()),
        Err(e @ (AppError::Validation { .. } | AppError::NotFound { .. })) => {
            tracing::info!(kind = e.kind(), details = %e.details(), "Search-add rejected");
            Ok(search_add_message(&e).into_response())
        }
        Err(e) => Err(e),
    }
}

fn search_add_message(e: &AppError) -> &'static str {
    if matches!(e, AppError::NotFound { .. }) {
        return "Error - category not found.";
    }

    let details = e.details();
    match details.get("field").and_then(|f| f.as_str()) {
        Some("title") if details.get("max").is_some() => "Error - page title too long.",
        Some("title") => "Error - missing page title.",
        Some("url") => "Error - invalid page URL.",
        _ => "Error - bad category ID.",
    }
}
