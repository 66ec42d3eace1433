use axum::extract::State;
use axum::Json;
use pilakon_db::models::category::AssetCategory;
use pilakon_db::repositories::CategoryRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<AssetCategory>,
}

/// GET /api/categories
///
/// All asset categories ordered by name.
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<CategoryListResponse>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(CategoryListResponse { categories }))
}
