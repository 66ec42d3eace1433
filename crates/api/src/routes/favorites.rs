use axum::routing::post;
use axum::Router;

use crate::handlers::favorites;
use crate::state::AppState;

/// Favorite routes mounted at `/favorites`.
///
/// ```text
/// POST   /        -> add_favorite
/// DELETE /        -> remove_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        post(favorites::add_favorite).delete(favorites::remove_favorite),
    )
}
