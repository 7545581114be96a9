//! PostgreSQL implementation of profile repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ProfileDetails, ProfileFields, User, UserProfile};
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    user_id: i64,
    website: Option<String>,
    picture: Option<String>,
}

impl From<ProfileRow> for UserProfile {
    fn from(r: ProfileRow) -> Self {
        UserProfile {
            id: r.id,
            user_id: r.user_id,
            website: r.website,
            picture: r.picture,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileDetailsRow {
    #[sqlx(flatten)]
    profile: ProfileRow,
    username: String,
    email: String,
    date_joined: DateTime<Utc>,
}

/// PostgreSQL repository for user profiles.
///
/// Writes rely on the `user_profiles_user_id_key` unique constraint to keep
/// profiles one-to-one with users.
pub struct PgProfileRepository {
    pool: Arc<PgPool>,
}

impl PgProfileRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<UserProfile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, user_id, website, picture FROM user_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn get_or_create(&self, user_id: i64) -> Result<UserProfile, AppError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO user_profiles (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, website, picture
            "#,
        )
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn upsert(&self, user_id: i64, fields: ProfileFields) -> Result<UserProfile, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO user_profiles (user_id, website, picture)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id)
            DO UPDATE SET website = EXCLUDED.website, picture = EXCLUDED.picture
            RETURNING id, user_id, website, picture
            "#,
        )
        .bind(user_id)
        .bind(fields.website)
        .bind(fields.picture)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_with_users(&self) -> Result<Vec<ProfileDetails>, AppError> {
        let rows = sqlx::query_as::<_, ProfileDetailsRow>(
            r#"
            SELECT p.id, p.user_id, p.website, p.picture,
                   u.username, u.email, u.date_joined
            FROM user_profiles p
            JOIN users u ON u.id = p.user_id
            ORDER BY u.username ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ProfileDetails {
                user: User {
                    id: r.profile.user_id,
                    username: r.username,
                    email: r.email,
                    date_joined: r.date_joined,
                },
                profile: r.profile.into(),
            })
            .collect())
    }
}
