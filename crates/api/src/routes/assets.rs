use axum::routing::get;
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
///
/// ```text
/// GET    /        -> list_assets
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(assets::list_assets))
}
