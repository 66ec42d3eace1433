//! Repository for the `user_favorites` table.

use pilakon_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::favorite::UserFavorite;

/// Column list for `user_favorites` queries.
const COLUMNS: &str = "id, user_id, asset_id, created_at";

/// Provides add/remove/lookup for per-user favorite markers.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Whether `user_id` has already favorited `asset_id`.
    pub async fn exists(
        pool: &PgPool,
        user_id: UserId,
        asset_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM user_favorites WHERE user_id = $1 AND asset_id = $2)",
        )
        .bind(user_id)
        .bind(asset_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Insert a favorite marker.
    ///
    /// Returns `None` when the pair already exists. The unique constraint
    /// makes this safe against two concurrent adds for the same pair.
    pub async fn add(
        pool: &PgPool,
        user_id: UserId,
        asset_id: DbId,
    ) -> Result<Option<UserFavorite>, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_favorites (user_id, asset_id) \
             VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_user_favorites_user_asset DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserFavorite>(&query)
            .bind(user_id)
            .bind(asset_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove a favorite marker. Returns true if a row was deleted.
    pub async fn remove(
        pool: &PgPool,
        user_id: UserId,
        asset_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_favorites WHERE user_id = $1 AND asset_id = $2")
                .bind(user_id)
                .bind(asset_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of markers for a pair (0 or 1 while the constraint holds).
    pub async fn count_for(
        pool: &PgPool,
        user_id: UserId,
        asset_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM user_favorites WHERE user_id = $1 AND asset_id = $2",
        )
        .bind(user_id)
        .bind(asset_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
