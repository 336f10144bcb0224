//! Preference store: user interests, category → subreddit mappings, and profiles.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{CategorySubreddit, InterestCategory, UserInterest};

/// Persistence boundary for interest preferences.
///
/// Carried in `AppState` as `Arc<dyn PreferenceStore>`.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get_interests(&self, user_id: Uuid) -> Result<Vec<UserInterest>, AppError>;

    /// Subreddit names mapped to a category-subreddit id.
    async fn get_sources_for_category(&self, csid: Uuid) -> Result<Vec<String>, AppError>;

    async fn get_category_subreddits(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<CategorySubreddit>, AppError>;

    async fn get_categories(&self) -> Result<Vec<InterestCategory>, AppError>;

    /// Inserts the interest or updates its weight. Returns true once stored.
    async fn add_interest(&self, user_id: Uuid, csid: Uuid, weight: i32) -> Result<bool, AppError>;

    /// Returns false when there was nothing to remove.
    async fn remove_interest(&self, user_id: Uuid, csid: Uuid) -> Result<bool, AppError>;

    /// Returns false when the interest does not exist.
    async fn update_interest_weight(
        &self,
        user_id: Uuid,
        csid: Uuid,
        weight: i32,
    ) -> Result<bool, AppError>;

    /// `None` for an unknown user.
    async fn get_user_email(&self, user_id: Uuid) -> Result<Option<String>, AppError>;
}

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgPreferenceStore {
    pool: PgPool,
}

impl PgPreferenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceStore for PgPreferenceStore {
    async fn get_interests(&self, user_id: Uuid) -> Result<Vec<UserInterest>, AppError> {
        Ok(sqlx::query_as::<_, UserInterest>(
            r#"
            SELECT interest_id, csid, user_id, weight
            FROM user_interests
            WHERE user_id = $1
            ORDER BY created_at ASC, interest_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_sources_for_category(&self, csid: Uuid) -> Result<Vec<String>, AppError> {
        Ok(sqlx::query_scalar(
            "SELECT subreddit FROM category_subreddits WHERE csid = $1 ORDER BY subreddit",
        )
        .bind(csid)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_category_subreddits(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<CategorySubreddit>, AppError> {
        Ok(sqlx::query_as::<_, CategorySubreddit>(
            r#"
            SELECT csid, category_id, subreddit
            FROM category_subreddits
            WHERE category_id = $1
            ORDER BY subreddit
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_categories(&self) -> Result<Vec<InterestCategory>, AppError> {
        Ok(sqlx::query_as::<_, InterestCategory>(
            "SELECT category_id, slug, label, emoji, description FROM interest_categories ORDER BY label",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn add_interest(&self, user_id: Uuid, csid: Uuid, weight: i32) -> Result<bool, AppError> {
        let stored: Option<Uuid> = sqlx::query_scalar(
            r#"
            INSERT INTO user_interests (interest_id, user_id, csid, weight)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, csid) DO UPDATE SET weight = EXCLUDED.weight
            RETURNING interest_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(csid)
        .bind(weight)
        .fetch_optional(&self.pool)
        .await?;

        if stored.is_some() {
            info!("Stored interest {csid} (weight {weight}) for user {user_id}");
        }
        Ok(stored.is_some())
    }

    async fn remove_interest(&self, user_id: Uuid, csid: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_interests WHERE user_id = $1 AND csid = $2")
            .bind(user_id)
            .bind(csid)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_interest_weight(
        &self,
        user_id: Uuid,
        csid: Uuid,
        weight: i32,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE user_interests SET weight = $1 WHERE user_id = $2 AND csid = $3")
                .bind(weight)
                .bind(user_id)
                .bind(csid)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_user_email(&self, user_id: Uuid) -> Result<Option<String>, AppError> {
        Ok(
            sqlx::query_scalar("SELECT COALESCE(email, '') FROM auth.users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}
