//! PostgreSQL implementation of category repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Category, NewCategory};
use crate::domain::repositories::CategoryRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    slug: String,
    views: i32,
    likes: i32,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Category::new(r.id, r.name, r.slug, r.views, r.likes)
    }
}

/// PostgreSQL repository for categories.
///
/// Like counting is a single `UPDATE ... RETURNING`, so concurrent likes
/// never lose increments.
pub struct PgCategoryRepository {
    pool: Arc<PgPool>,
}

impl PgCategoryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, slug, views, likes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, slug, views, likes
            "#,
        )
        .bind(new_category.name())
        .bind(new_category.slug())
        .bind(new_category.views())
        .bind(new_category.likes())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, views, likes FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, views, likes FROM categories WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, views, likes FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn top_by_likes(&self, limit: i64) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, views, likes
            FROM categories
            ORDER BY likes DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_likes(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, views, likes
            FROM categories
            ORDER BY likes DESC, id ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_name_prefix(
        &self,
        prefix: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Category>, AppError> {
        // starts_with avoids escaping LIKE wildcards in user input.
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, views, likes
            FROM categories
            WHERE starts_with(lower(name), lower($1))
            ORDER BY id ASC
            LIMIT $2
            "#,
        )
        .bind(prefix)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn increment_likes(&self, id: i64) -> Result<Option<i32>, AppError> {
        let likes = sqlx::query_scalar::<_, i32>(
            "UPDATE categories SET likes = likes + 1 WHERE id = $1 RETURNING likes",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(likes)
    }

    async fn rename(&self, id: i64, renamed: NewCategory) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = $2, slug = $3
            WHERE id = $1
            RETURNING id, name, slug, views, likes
            "#,
        )
        .bind(id)
        .bind(renamed.name())
        .bind(renamed.slug())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
