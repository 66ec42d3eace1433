//! Handler for the public asset browser listing.

use axum::extract::{Query, State};
use axum::Json;
use pilakon_core::asset_query::{build_query_spec, AssetListParams, AssetQuery};
use pilakon_db::models::asset::AssetListItem;
use pilakon_db::repositories::AssetRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::MaybeSession;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AssetListResponse {
    pub assets: Vec<AssetListItem>,
}

/// GET /api/assets
///
/// Public assets filtered by `search` and `category`, ordered by
/// `sortBy`/`sortOrder`. A signed-in caller also gets their favorite
/// markers; anonymous callers see every `is_favorite` as false.
pub async fn list_assets(
    MaybeSession(session): MaybeSession,
    State(state): State<AppState>,
    Query(params): Query<AssetListParams>,
) -> AppResult<Json<AssetListResponse>> {
    let query = AssetQuery::from_params(&params)?;
    let spec = build_query_spec(&query);
    let viewer = session.map(|s| s.user_id);

    let rows = AssetRepo::list(&state.pool, &spec, viewer).await?;
    let assets: Vec<AssetListItem> = rows.into_iter().map(AssetListItem::from).collect();

    tracing::debug!(
        count = assets.len(),
        sort_by = query.sort_by.as_str(),
        signed_in = viewer.is_some(),
        "Listed assets",
    );

    Ok(Json(AssetListResponse { assets }))
}
