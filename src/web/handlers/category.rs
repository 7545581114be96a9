//! Category pages, likes and suggestions.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::services::CategoryDetails;
use crate::domain::entities::Category;
use crate::error::AppError;
use crate::infrastructure::search::SearchResult;
use crate::state::AppState;
use crate::web::forms::{CategoryForm, FormErrors, SearchForm};
use crate::web::middleware::{CurrentUser, OptionalUser};
use crate::web::redirect::found;

#[derive(Template, WebTemplate)]
#[template(path = "category.html")]
pub struct CategoryTemplate {
    pub user: Option<CurrentUser>,
    pub slug: String,
    pub details: Option<CategoryDetails>,
    pub query: String,
    pub results: Vec<SearchResult>,
    pub search_enabled: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "add_category.html")]
pub struct AddCategoryTemplate {
    pub user: Option<CurrentUser>,
    pub form: CategoryForm,
    pub errors: FormErrors,
}

/// Category list fragment used by the suggestion sidebar.
#[derive(Template, WebTemplate)]
#[template(path = "categories.html")]
pub struct CategoryListTemplate {
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub struct LikeParams {
    pub category_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub suggestion: Option<String>,
}

/// Renders a category and its pages.
///
/// An unknown slug still renders, with a "does not exist" message.
///
/// # Endpoint
///
/// `GET /category/{slug}`
pub async fn show_category_handler(
    State(st): State<AppState>,
    Path(slug): Path<String>,
    OptionalUser(user): OptionalUser,
) -> Result<CategoryTemplate, AppError> {
    render_category(&st, slug, user, String::new(), Vec::new()).await
}

/// Runs a web search from the category page.
///
/// Search failures are logged and shown as an empty result list.
///
/// # Endpoint
///
/// `POST /category/{slug}`
pub async fn search_category_handler(
    State(st): State<AppState>,
    Path(slug): Path<String>,
    OptionalUser(user): OptionalUser,
    axum::Form(form): axum::Form<SearchForm>,
) -> Result<CategoryTemplate, AppError> {
    let query = form.query.trim().to_string();

    let results = if query.is_empty() {
        Vec::new()
    } else {
        match st.search.search(&query).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(error = %e, "Web search failed");
                Vec::new()
            }
        }
    };

    render_category(&st, slug, user, query, results).await
}

async fn render_category(
    st: &AppState,
    slug: String,
    user: Option<CurrentUser>,
    query: String,
    results: Vec<SearchResult>,
) -> Result<CategoryTemplate, AppError> {
    let details = st.category_service.category_details(&slug).await?;

    Ok(CategoryTemplate {
        user,
        slug,
        details,
        query,
        results,
        search_enabled: st.search.is_enabled(),
    })
}

/// Shows the empty add-category form.
///
/// # Endpoint
///
/// `GET /add_category`
pub async fn add_category_page_handler(user: CurrentUser) -> AddCategoryTemplate {
    AddCategoryTemplate {
        user: Some(user),
        form: CategoryForm::default(),
        errors: FormErrors::new(),
    }
}

/// Creates a category and redirects home, or re-renders the form with errors.
///
/// # Endpoint
///
/// `POST /add_category`
pub async fn add_category_handler(
    State(st): State<AppState>,
    user: CurrentUser,
    axum::Form(form): axum::Form<CategoryForm>,
) -> Result<Response, AppError> {
    let cleaned = match form.clone().clean() {
        Ok(cleaned) => cleaned,
        Err(errors) => return Ok(add_category_form(user, form, errors)),
    };

    match st.category_service.add_category(&cleaned.name).await {
        Ok(_) => Ok(found("/")),
        Err(e @ (AppError::Conflict { .. } | AppError::Validation { .. })) => {
            let mut errors = FormErrors::new();
            let message = match e.constraint() {
                Some("categories_slug_key") => {
                    "A category with a similar name already exists.".to_string()
                }
                Some(_) => "Category with this Name already exists.".to_string(),
                None => e.to_string(),
            };
            errors.add("name", message);
            Ok(add_category_form(user, form, errors))
        }
        Err(e) => Err(e),
    }
}

fn add_category_form(user: CurrentUser, form: CategoryForm, errors: FormErrors) -> Response {
    AddCategoryTemplate {
        user: Some(user),
        form,
        errors,
    }
    .into_response()
}

/// Adds a like and answers with the new total as plain text.
///
/// Both a malformed and an unknown id answer `-1`.
///
/// # Endpoint
///
/// `GET /like_category?category_id={id}`
pub async fn like_category_handler(
    State(st): State<AppState>,
    Query(params): Query<LikeParams>,
) -> Result<String, AppError> {
    match st
        .category_service
        .like_category(params.category_id.as_deref())
        .await
    {
        Ok(likes) => Ok(likes.to_string()),
        Err(e @ (AppError::Validation { .. } | AppError::NotFound { .. })) => {
            tracing::info!(kind = e.kind(), details = %e.details(), "Like rejected");
            Ok("-1".to_string())
        }
        Err(e) => Err(e),
    }
}

/// Renders category suggestions for the sidebar.
///
/// # Endpoint
///
/// `GET /suggest?suggestion={prefix}`
pub async fn suggest_category_handler(
    State(st): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Result<CategoryListTemplate, AppError> {
    let prefix = params.suggestion.unwrap_or_default();
    let categories = st.category_service.suggestions(&prefix).await?;

    Ok(CategoryListTemplate { categories })
}
