//! Comic and panel models.

use pilakon_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `comics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comic {
    pub id: DbId,
    pub title: String,
    pub user_id: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `panels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: DbId,
    pub comic_id: DbId,
    pub image_url: String,
    pub text: Option<String>,
    pub width: String,
    pub text_position: String,
    pub text_style: String,
    /// Display position within the comic. Not unique.
    pub order: i32,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComic {
    pub title: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePanel {
    pub comic_id: DbId,
    pub image_url: String,
    pub text: Option<String>,
    pub width: String,
    pub text_position: String,
    pub text_style: String,
    pub order: i32,
}
