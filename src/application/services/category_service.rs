//! Category browsing, creation, likes and suggestions.

use std::sync::Arc;

use crate::domain::entities::{Category, NewCategory, Page};
use crate::domain::repositories::{CategoryRepository, PageRepository};
use crate::error::AppError;
use serde_json::json;

/// Maximum number of suggestions returned for a non-empty match.
pub const SUGGESTION_LIMIT: i64 = 8;

/// Longest accepted category name.
pub const MAX_NAME_LENGTH: usize = 128;

/// A category together with its pages, most viewed first.
#[derive(Debug, Clone)]
pub struct CategoryDetails {
    pub category: Category,
    pub pages: Vec<Page>,
}

/// Service for category operations.
///
/// Keeps invalid input and missing records as distinct [`AppError`] kinds;
/// handlers decide how to present them.
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    pages: Arc<dyn PageRepository>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(categories: Arc<dyn CategoryRepository>, pages: Arc<dyn PageRepository>) -> Self {
        Self { categories, pages }
    }

    /// Creates a category from a display name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is blank, too long, or
    /// has no characters usable in a slug.
    /// Returns [`AppError::Conflict`] if the name or its slug is taken; the
    /// violated constraint is available through [`AppError::constraint`].
    pub async fn add_category(&self, name: &str) -> Result<Category, AppError> {
        let new_category = Self::prepare(name)?;
        let category = self.categories.create(new_category).await?;

        tracing::info!(id = category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    /// Looks up a category by slug along with its pages.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn category_details(&self, slug: &str) -> Result<Option<CategoryDetails>, AppError> {
        let Some(category) = self.categories.find_by_slug(slug).await? else {
            return Ok(None);
        };

        let pages = self.pages.list_by_category(category.id).await?;
        Ok(Some(CategoryDetails { category, pages }))
    }

    /// Adds one like to the category identified by `raw_id`.
    ///
    /// Surrounding whitespace in the identifier is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `raw_id` is missing or not an integer.
    /// Returns [`AppError::NotFound`] if no category has that id.
    pub async fn like_category(&self, raw_id: Option<&str>) -> Result<i32, AppError> {
        let id = parse_id(raw_id, "category_id")?;

        let likes = self
            .categories
            .increment_likes(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "id": id })))?;

        metrics::counter!("rango_category_likes_total").increment(1);
        Ok(likes)
    }

    /// Filters categories by case-insensitive name prefix.
    ///
    /// An empty prefix matches nothing. `max_results > 0` caps the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn filter_by_prefix(
        &self,
        prefix: &str,
        max_results: i64,
    ) -> Result<Vec<Category>, AppError> {
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        let limit = (max_results > 0).then_some(max_results);
        self.categories.find_by_name_prefix(prefix, limit).await
    }

    /// Suggestions for the sidebar search box.
    ///
    /// Returns up to [`SUGGESTION_LIMIT`] prefix matches, or every category
    /// ordered by likes when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn suggestions(&self, prefix: &str) -> Result<Vec<Category>, AppError> {
        let matches = self.filter_by_prefix(prefix, SUGGESTION_LIMIT).await?;
        if !matches.is_empty() {
            return Ok(matches);
        }

        self.categories.list_by_likes().await
    }

    /// Renames the category with `slug`, re-deriving its slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no category has that slug.
    /// Returns [`AppError::Validation`] or [`AppError::Conflict`] as for
    /// [`Self::add_category`].
    pub async fn rename_category(&self, slug: &str, new_name: &str) -> Result<Category, AppError> {
        let renamed = Self::prepare(new_name)?;

        let category = self
            .categories
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "slug": slug })))?;

        self.categories
            .rename(category.id, renamed)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "slug": slug })))
    }

    /// Creates the category if absent and applies the given counters.
    ///
    /// Used by the admin seeding command.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for unusable names.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn ensure_category(
        &self,
        name: &str,
        views: i32,
        likes: i32,
    ) -> Result<Category, AppError> {
        let new_category = Self::prepare(name)?.with_counters(views, likes);

        if let Some(existing) = self.categories.find_by_name(new_category.name()).await? {
            return Ok(existing);
        }

        self.categories.create(new_category).await
    }

    fn prepare(name: &str) -> Result<NewCategory, AppError> {
        let new_category = NewCategory::new(name);

        if new_category.name().is_empty() {
            return Err(AppError::bad_request(
                "Category name is required",
                json!({ "field": "name" }),
            ));
        }
        if new_category.name().chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::bad_request(
                "Category name is too long",
                json!({ "field": "name", "max": MAX_NAME_LENGTH }),
            ));
        }
        if new_category.slug().is_empty() {
            return Err(AppError::bad_request(
                "Category name must contain letters or digits",
                json!({ "field": "name" }),
            ));
        }

        Ok(new_category)
    }
}

/// Parses a record id from a query parameter.
pub(crate) fn parse_id(raw: Option<&str>, field: &str) -> Result<i64, AppError> {
    let raw = raw.unwrap_or_default();
    raw.trim().parse::<i64>().map_err(|_| {
        AppError::bad_request(
            format!("Invalid {field}"),
            json!({ "field": field, "value": raw }),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockCategoryRepository, MockPageRepository};

    fn category(id: i64, name: &str, likes: i32) -> Category {
        Category::new(
            id,
            name.to_string(),
            crate::utils::slug::slugify(name),
            0,
            likes,
        )
    }

    fn service(categories: MockCategoryRepository) -> CategoryService {
        CategoryService::new(Arc::new(categories), Arc::new(MockPageRepository::new()))
    }

    #[tokio::test]
    async fn test_like_category_returns_new_total() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_increment_likes()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(Some(13)));

        let likes = service(categories).like_category(Some(" 7 ")).await.unwrap();
        assert_eq!(likes, 13);
    }

    #[tokio::test]
    async fn test_like_category_rejects_non_numeric_id() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_increment_likes().never();

        let result = service(categories).like_category(Some("abc")).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_like_category_rejects_missing_id() {
        let categories = MockCategoryRepository::new();

        let result = service(categories).like_category(None).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_like_category_unknown_id_is_not_found() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_increment_likes()
            .returning(|_| Ok(None));

        let result = service(categories).like_category(Some("999")).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_filter_empty_prefix_matches_nothing() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_name_prefix().never();

        let result = service(categories).filter_by_prefix("", 8).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_filter_passes_cap_only_when_positive() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_name_prefix()
            .withf(|prefix, limit| prefix == "Py" && limit.is_none())
            .times(1)
            .returning(|_, _| Ok(vec![category(1, "Python", 3)]));

        let result = service(categories).filter_by_prefix("Py", 0).await.unwrap();
        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_suggestions_use_limit_of_eight() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_name_prefix()
            .withf(|prefix, limit| prefix == "p" && *limit == Some(8))
            .times(1)
            .returning(|_, _| Ok(vec![category(1, "Python", 3), category(2, "Perl", 1)]));
        categories.expect_list_by_likes().never();

        let result = service(categories).suggestions("p").await.unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_suggestions_fall_back_to_all_by_likes() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_name_prefix()
            .returning(|_, _| Ok(vec![]));
        categories.expect_list_by_likes().times(1).returning(|| {
            Ok(vec![
                category(3, "Rust", 9),
                category(1, "Python", 3),
                category(2, "Perl", 1),
            ])
        });

        let result = service(categories).suggestions("Zzz").await.unwrap();
        let names: Vec<_> = result.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Python", "Perl"]);
    }

    #[tokio::test]
    async fn test_suggestions_empty_prefix_lists_all() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_name_prefix().never();
        categories
            .expect_list_by_likes()
            .times(1)
            .returning(|| Ok(vec![category(1, "Python", 3)]));

        let result = service(categories).suggestions("").await.unwrap();
        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_add_category_derives_slug() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_create()
            .withf(|new| new.name() == "Random Category String" && new.slug() == "random-category-string")
            .times(1)
            .returning(|new| {
                Ok(Category::new(
                    1,
                    new.name().to_string(),
                    new.slug().to_string(),
                    0,
                    0,
                ))
            });

        let created = service(categories)
            .add_category("Random Category String")
            .await
            .unwrap();
        assert_eq!(created.slug, "random-category-string");
    }

    #[tokio::test]
    async fn test_add_category_rejects_blank_and_symbol_only_names() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_create().never();
        let service = service(categories);

        assert!(matches!(
            service.add_category("   ").await,
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            service.add_category("+++").await,
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            service.add_category(&"x".repeat(129)).await,
            Err(AppError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_category_details_unknown_slug() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_slug().returning(|_| Ok(None));

        let result = service(categories).category_details("nope").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_category_details_includes_pages() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_slug()
            .returning(|_| Ok(Some(category(4, "Rust", 2))));

        let mut pages = MockPageRepository::new();
        pages
            .expect_list_by_category()
            .withf(|id| *id == 4)
            .returning(|id| {
                Ok(vec![Page::new(
                    1,
                    id,
                    "The Book".into(),
                    "https://doc.rust-lang.org/book/".into(),
                    3,
                    None,
                )])
            });

        let service = CategoryService::new(Arc::new(categories), Arc::new(pages));
        let details = service.category_details("rust").await.unwrap().unwrap();

        assert_eq!(details.category.id, 4);
        assert_eq!(details.pages.len(), 1);
    }

    #[tokio::test]
    async fn test_rename_category_unknown_slug() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_slug().returning(|_| Ok(None));
        categories.expect_rename().never();

        let result = service(categories).rename_category("nope", "New").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_ensure_category_returns_existing() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_name()
            .withf(|name| name == "Python")
            .returning(|_| Ok(Some(category(1, "Python", 64))));
        categories.expect_create().never();

        let result = service(categories)
            .ensure_category("Python", 128, 64)
            .await
            .unwrap();
        assert_eq!(result.id, 1);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(Some(" 42\n"), "page_id").unwrap(), 42);
        assert!(parse_id(Some(""), "page_id").is_err());
        assert!(parse_id(Some("4.2"), "page_id").is_err());
        assert!(parse_id(None, "page_id").is_err());
    }
}
