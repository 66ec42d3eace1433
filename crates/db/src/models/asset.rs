//! Asset models and DTOs.

use pilakon_core::asset_query::display_category;
use pilakon_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Path of the object inside the storage bucket. Set together with
    /// `public_url` at upload time.
    pub file_path: String,
    pub public_url: String,
    pub category_id: Option<DbId>,
    pub tags: Json<Vec<String>>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub uploaded_by: UserId,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Asset joined with its category name and the requester's favorite marker.
#[derive(Debug, Clone, FromRow)]
pub struct AssetListingRow {
    #[sqlx(flatten)]
    pub asset: Asset,
    /// `NULL` when the asset has no category.
    pub category_name: Option<String>,
    pub is_favorite: bool,
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Denormalized asset as returned by `GET /api/assets`.
#[derive(Debug, Clone, Serialize)]
pub struct AssetListItem {
    #[serde(flatten)]
    pub asset: Asset,
    /// Category name, or `"Uncategorized"`.
    pub category: String,
    pub is_favorite: bool,
    /// Same as `publicUrl`; no separate thumbnails are generated.
    pub thumbnail: String,
}

impl From<AssetListingRow> for AssetListItem {
    fn from(row: AssetListingRow) -> Self {
        let category = display_category(row.category_name.as_deref()).to_string();
        let thumbnail = row.asset.public_url.clone();
        Self {
            asset: row.asset,
            category,
            is_favorite: row.is_favorite,
            thumbnail,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting an asset row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAsset {
    pub name: String,
    pub description: Option<String>,
    pub file_path: String,
    pub public_url: String,
    pub category_id: Option<DbId>,
    pub tags: Vec<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub uploaded_by: UserId,
    pub is_public: bool,
}
