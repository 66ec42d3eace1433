//! Connectivity self-check for operators.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pilakon_db::models::category::AssetCategory;
use pilakon_db::repositories::CategoryRepo;
use serde::Serialize;
use serde_json::json;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticResponse {
    pub success: bool,
    pub message: &'static str,
    /// Whether session verification has a signing secret.
    pub auth_connected: bool,
    pub database_connected: bool,
    pub storage_connected: bool,
    /// At most one category row.
    pub test_query: Vec<AssetCategory>,
}

/// GET /api/test-db
///
/// Checks the database and the storage service. A database failure yields
/// 500 with the underlying error; a storage failure only flips
/// `storageConnected`.
pub async fn test_db(State(state): State<AppState>) -> Response {
    let storage_connected = match state
        .storage
        .list(&state.config.storage.upload_bucket, "", 1)
        .await
    {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Storage check failed");
            false
        }
    };

    match CategoryRepo::sample(&state.pool, 1).await {
        Ok(test_query) => Json(DiagnosticResponse {
            success: true,
            message: "Database connection successful",
            auth_connected: !state.config.session.jwt_secret.is_empty(),
            database_connected: true,
            storage_connected,
            test_query,
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Database check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": err.to_string(),
                    "details": format!("{err:?}"),
                })),
            )
                .into_response()
        }
    }
}
