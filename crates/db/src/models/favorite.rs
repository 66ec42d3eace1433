use pilakon_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_favorites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFavorite {
    pub id: DbId,
    pub user_id: UserId,
    pub asset_id: DbId,
    pub created_at: Timestamp,
}
