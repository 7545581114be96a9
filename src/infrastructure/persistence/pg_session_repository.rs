//! PostgreSQL implementation of session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::SessionData;
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct SessionRow {
    user_id: Option<i64>,
    visits: Option<i64>,
    last_visit: Option<String>,
}

/// PostgreSQL-backed session store.
///
/// Rows are keyed by the hex HMAC of the cookie value and ignored once
/// `expires_at` has passed, even before the purge task removes them.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn load(&self, session_hash: &str) -> Result<Option<SessionData>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT user_id, visits, last_visit
            FROM sessions
            WHERE session_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(session_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| SessionData {
            user_id: r.user_id,
            visits: r.visits,
            last_visit: r.last_visit,
        }))
    }

    async fn save(
        &self,
        session_hash: &str,
        data: &SessionData,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (session_hash, user_id, visits, last_visit, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (session_hash) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                visits = EXCLUDED.visits,
                last_visit = EXCLUDED.last_visit,
                expires_at = EXCLUDED.expires_at,
                updated_at = NOW()
            "#,
        )
        .bind(session_hash)
        .bind(data.user_id)
        .bind(data.visits)
        .bind(data.last_visit.as_deref())
        .bind(expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn delete(&self, session_hash: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE session_hash = $1")
            .bind(session_hash)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sessions WHERE expires_at > NOW()")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }
}
