//! Repository for the `ratings` table.

use ratewise_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::{Rating, RatingWithStore, RatingWithUser};

/// Column list shared across queries.
const COLUMNS: &str = "id, value, user_id, store_id, created_at, updated_at";

/// Provides the rating lifecycle operations (upsert, delete) and the
/// joined reads the dashboards need.
pub struct RatingRepo;

impl RatingRepo {
    /// Submit or revise a rating: one atomic statement keyed on the
    /// `uq_ratings_user_store` constraint, so two concurrent submissions
    /// from the same user can never create duplicate rows.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        store_id: DbId,
        value: i16,
    ) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings (user_id, store_id, value) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, store_id) DO UPDATE \
             SET value = EXCLUDED.value \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(store_id)
            .bind(value)
            .fetch_one(pool)
            .await
    }

    /// Delete the caller's rating for a store. Returns `true` if a row
    /// was removed, `false` if no rating existed.
    pub async fn delete(
        pool: &PgPool,
        user_id: DbId,
        store_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ratings WHERE user_id = $1 AND store_id = $2")
            .bind(user_id)
            .bind(store_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a single (user, store) rating.
    pub async fn find_by_user_and_store(
        pool: &PgPool,
        user_id: DbId,
        store_id: DbId,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ratings WHERE user_id = $1 AND store_id = $2"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(store_id)
            .fetch_optional(pool)
            .await
    }

    /// Raw rating values for one store, for in-process aggregation.
    pub async fn values_for_store(
        pool: &PgPool,
        store_id: DbId,
    ) -> Result<Vec<i16>, sqlx::Error> {
        let rows: Vec<(i16,)> =
            sqlx::query_as("SELECT value FROM ratings WHERE store_id = $1")
                .bind(store_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(v,)| v).collect())
    }

    /// Ratings for one store joined with rater identity, newest first.
    pub async fn list_for_store_with_users(
        pool: &PgPool,
        store_id: DbId,
    ) -> Result<Vec<RatingWithUser>, sqlx::Error> {
        sqlx::query_as::<_, RatingWithUser>(
            "SELECT r.id, r.value, r.created_at, \
                    u.id AS user_id, u.name AS user_name, u.email AS user_email \
             FROM ratings r \
             JOIN users u ON u.id = r.user_id \
             WHERE r.store_id = $1 \
             ORDER BY r.created_at DESC",
        )
        .bind(store_id)
        .fetch_all(pool)
        .await
    }

    /// Ratings submitted by one user joined with store names, newest first.
    pub async fn list_for_user_with_stores(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RatingWithStore>, sqlx::Error> {
        sqlx::query_as::<_, RatingWithStore>(
            "SELECT r.id, r.value, r.created_at, \
                    s.id AS store_id, s.name AS store_name \
             FROM ratings r \
             JOIN stores s ON s.id = r.store_id \
             WHERE r.user_id = $1 \
             ORDER BY r.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
