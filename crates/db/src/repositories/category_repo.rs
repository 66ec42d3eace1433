//! Repository for the `asset_categories` lookup table.

use sqlx::PgPool;

use crate::models::category::{AssetCategory, CreateCategory};

/// Column list for `asset_categories` queries.
const COLUMNS: &str = "id, name, description, icon, created_at";

/// Provides read and insert operations for asset categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category. Names are unique (`uq_asset_categories_name`).
    pub async fn create(
        pool: &PgPool,
        input: &CreateCategory,
    ) -> Result<AssetCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO asset_categories (name, description, icon) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssetCategory>(&query)
            .bind(&input.name)
            .bind(input.description.as_deref())
            .bind(input.icon.as_deref())
            .fetch_one(pool)
            .await
    }

    /// List all categories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<AssetCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM asset_categories ORDER BY name");
        sqlx::query_as::<_, AssetCategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// Fetch at most `limit` categories in storage order. Used by the
    /// connectivity diagnostic.
    pub async fn sample(pool: &PgPool, limit: i64) -> Result<Vec<AssetCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM asset_categories LIMIT $1");
        sqlx::query_as::<_, AssetCategory>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
