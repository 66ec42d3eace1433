pub mod assets;
pub mod categories;
pub mod comics;
pub mod diagnostics;
pub mod favorites;
pub mod health;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /assets                     list public assets (session optional)
/// /categories                 list categories
/// /favorites                  add (POST), remove (DELETE)
/// /upload                     upload an image (POST, multipart)
/// /comics                     list (GET), create (POST, 501)
/// /comics/{id}/panels         list panels of an owned comic
/// /test-db                    connectivity diagnostic
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/assets", assets::router())
        .nest("/categories", categories::router())
        .nest("/favorites", favorites::router())
        .nest("/upload", upload::router())
        .nest("/comics", comics::router())
        .merge(diagnostics::router())
}
