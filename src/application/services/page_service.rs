//! Page visits and search-driven page creation.

use std::sync::Arc;

use crate::application::services::category_service::parse_id;
use crate::domain::entities::{NewPage, Page};
use crate::domain::repositories::{CategoryRepository, PageRepository};
use crate::error::AppError;
use crate::utils::url_normalizer::normalize_page_url;
use serde_json::json;

/// Longest accepted page title.
pub const MAX_TITLE_LENGTH: usize = 128;

/// Longest accepted page URL, after normalization.
pub const MAX_URL_LENGTH: usize = 200;

/// Service for page operations.
pub struct PageService {
    categories: Arc<dyn CategoryRepository>,
    pages: Arc<dyn PageRepository>,
}

impl PageService {
    /// Creates a new page service.
    pub fn new(categories: Arc<dyn CategoryRepository>, pages: Arc<dyn PageRepository>) -> Self {
        Self { categories, pages }
    }

    /// Counts one visit to the page identified by `raw_id` and returns it.
    ///
    /// The view counter and `last_visit` are updated in one statement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `raw_id` is missing or not an integer.
    /// Returns [`AppError::NotFound`] if no page has that id.
    pub async fn visit_page(&self, raw_id: Option<&str>) -> Result<Page, AppError> {
        let id = parse_id(raw_id, "page_id")?;

        let page = self
            .pages
            .record_visit(id)
            .await?
            .ok_or_else(|| AppError::not_found("Page not found", json!({ "id": id })))?;

        metrics::counter!("rango_page_visits_total").increment(1);
        tracing::debug!(page_id = page.id, views = page.views, "Page visit recorded");
        Ok(page)
    }

    /// Adds a search result to a category and returns the category's pages.
    ///
    /// Adding the same title and URL twice keeps a single page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with a `field` detail of
    /// `category_id`, `title` or `url` for bad input.
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn search_add_page(
        &self,
        raw_category_id: Option<&str>,
        title: Option<&str>,
        url: Option<&str>,
    ) -> Result<Vec<Page>, AppError> {
        let category_id = parse_id(raw_category_id, "category_id")?;

        let category = self.categories.find_by_id(category_id).await?.ok_or_else(|| {
            AppError::not_found("Category not found", json!({ "id": category_id }))
        })?;

        let new_page = prepare_page(category.id, title, url)?;
        let page = self.pages.get_or_create(new_page).await?;
        tracing::debug!(page_id = page.id, category_id = category.id, "Page added from search");

        self.pages.list_by_category(category.id).await
    }

    /// Creates the page if absent.
    ///
    /// Used by the admin seeding command; returns the page as stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for bad titles or URLs.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn ensure_page(
        &self,
        category_id: i64,
        title: &str,
        url: &str,
    ) -> Result<Page, AppError> {
        let new_page = prepare_page(category_id, Some(title), Some(url))?;
        self.pages.get_or_create(new_page).await
    }
}

fn prepare_page(category_id: i64, title: Option<&str>, url: Option<&str>) -> Result<NewPage, AppError> {
    let title = title.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(AppError::bad_request(
            "Page title is required",
            json!({ "field": "title" }),
        ));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::bad_request(
            "Page title is too long",
            json!({ "field": "title", "max": MAX_TITLE_LENGTH }),
        ));
    }

    let url = normalize_page_url(url.unwrap_or_default()).map_err(|e| {
        AppError::bad_request(
            "Invalid page URL",
            json!({ "field": "url", "reason": e.to_string() }),
        )
    })?;
    if url.len() > MAX_URL_LENGTH {
        return Err(AppError::bad_request(
            "Page URL is too long",
            json!({ "field": "url", "max": MAX_URL_LENGTH }),
        ));
    }

    Ok(NewPage {
        category_id,
        title: title.to_string(),
        url,
    })
}
