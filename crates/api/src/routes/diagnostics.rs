use axum::routing::get;
use axum::Router;

use crate::handlers::diagnostics;
use crate::state::AppState;

/// Diagnostic routes, merged at the `/api` root.
pub fn router() -> Router<AppState> {
    Router::new().route("/test-db", get(diagnostics::test_db))
}
