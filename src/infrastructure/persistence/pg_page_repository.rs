//! PostgreSQL implementation of page repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewPage, Page};
use crate::domain::repositories::PageRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct PageRow {
    id: i64,
    category_id: i64,
    title: String,
    url: String,
    views: i32,
    last_visit: Option<DateTime<Utc>>,
}

impl From<PageRow> for Page {
    fn from(r: PageRow) -> Self {
        Page::new(r.id, r.category_id, r.title, r.url, r.views, r.last_visit)
    }
}

/// PostgreSQL repository for pages and their view counters.
pub struct PgPageRepository {
    pool: Arc<PgPool>,
}

impl PgPageRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageRepository for PgPageRepository {
    async fn create(&self, new_page: NewPage) -> Result<Page, AppError> {
        let row = sqlx::query_as::<_, PageRow>(
            r#"
            INSERT INTO pages (category_id, title, url)
            VALUES ($1, $2, $3)
            RETURNING id, category_id, title, url, views, last_visit
            "#,
        )
        .bind(new_page.category_id)
        .bind(&new_page.title)
        .bind(&new_page.url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Page>, AppError> {
        let row = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, category_id, title, url, views, last_visit
            FROM pages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn get_or_create(&self, new_page: NewPage) -> Result<Page, AppError> {
        // Concurrent callers race on the unique key; the loser reads the winner's row.
        let inserted = sqlx::query_as::<_, PageRow>(
            r#"
            INSERT INTO pages (category_id, title, url)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT pages_category_title_url_key DO NOTHING
            RETURNING id, category_id, title, url, views, last_visit
            "#,
        )
        .bind(new_page.category_id)
        .bind(&new_page.title)
        .bind(&new_page.url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if let Some(row) = inserted {
            return Ok(row.into());
        }

        let existing = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, category_id, title, url, views, last_visit
            FROM pages
            WHERE category_id = $1 AND title = $2 AND url = $3
            "#,
        )
        .bind(new_page.category_id)
        .bind(&new_page.title)
        .bind(&new_page.url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(existing.into())
    }

    async fn list_by_category(&self, category_id: i64) -> Result<Vec<Page>, AppError> {
        let rows = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, category_id, title, url, views, last_visit
            FROM pages
            WHERE category_id = $1
            ORDER BY views DESC, id ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn top_by_views(&self, limit: i64) -> Result<Vec<Page>, AppError> {
        let rows = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, category_id, title, url, views, last_visit
            FROM pages
            ORDER BY views DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn record_visit(&self, id: i64) -> Result<Option<Page>, AppError> {
        let row = sqlx::query_as::<_, PageRow>(
            r#"
            UPDATE pages
            SET views = views + 1, last_visit = NOW()
            WHERE id = $1
            RETURNING id, category_id, title, url, views, last_visit
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pages")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
