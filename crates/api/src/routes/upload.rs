use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use pilakon_core::upload::MAX_UPLOAD_BYTES;

use crate::handlers::upload;
use crate::state::AppState;

/// Body limit for upload requests. Leaves room above the file cap so
/// oversize files reach validation instead of being cut off.
pub const UPLOAD_BODY_LIMIT_BYTES: usize = 2 * MAX_UPLOAD_BYTES as usize;

/// Upload routes mounted at `/upload`.
///
/// ```text
/// POST   /        -> upload_asset (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        post(upload::upload_asset).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT_BYTES)),
    )
}
