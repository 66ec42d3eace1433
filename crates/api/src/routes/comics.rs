use axum::routing::get;
use axum::Router;

use crate::handlers::comics;
use crate::state::AppState;

/// Comic routes mounted at `/comics`.
///
/// ```text
/// GET    /                -> list_comics
/// POST   /                -> create_comic
/// GET    /{id}/panels     -> list_panels
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(comics::list_comics).post(comics::create_comic))
        .route("/{id}/panels", get(comics::list_panels))
}
