//! Handlers for marking assets as favorites.
//!
//! Both endpoints take `{"assetId": "..."}` and act on the caller's own
//! favorites only.

use axum::extract::State;
use axum::Json;
use pilakon_core::error::CoreError;
use pilakon_core::types::DbId;
use pilakon_db::repositories::{AssetRepo, FavoriteRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Session;
use crate::state::AppState;

/// Request body for favorite add/remove.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub asset_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// POST /api/favorites
pub async fn add_favorite(
    session: Session,
    State(state): State<AppState>,
    Json(input): Json<FavoriteRequest>,
) -> AppResult<Json<SuccessResponse>> {
    let asset_id = parse_asset_id(&input)?;

    if !AssetRepo::exists(&state.pool, asset_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id: asset_id,
        }));
    }

    if FavoriteRepo::exists(&state.pool, session.user_id, asset_id).await? {
        return Err(already_favorited());
    }

    // A concurrent add can still win between the check and the insert.
    FavoriteRepo::add(&state.pool, session.user_id, asset_id)
        .await?
        .ok_or_else(already_favorited)?;

    tracing::info!(
        user_id = %session.user_id,
        email = session.email.as_deref(),
        %asset_id,
        "Favorite added",
    );

    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/favorites
///
/// Succeeds whether or not the favorite existed.
pub async fn remove_favorite(
    session: Session,
    State(state): State<AppState>,
    Json(input): Json<FavoriteRequest>,
) -> AppResult<Json<SuccessResponse>> {
    let asset_id = parse_asset_id(&input)?;

    let removed = FavoriteRepo::remove(&state.pool, session.user_id, asset_id).await?;

    tracing::info!(user_id = %session.user_id, %asset_id, removed, "Favorite removed");

    Ok(Json(SuccessResponse { success: true }))
}

fn parse_asset_id(input: &FavoriteRequest) -> AppResult<DbId> {
    let raw = input
        .asset_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Asset ID required".into()))?;

    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid asset ID '{raw}'")))
}

fn already_favorited() -> AppError {
    AppError::BadRequest("Already favorited".into())
}
