//! Handlers for the caller's comics and their panels.

use axum::extract::{Path, State};
use axum::Json;
use pilakon_core::error::CoreError;
use pilakon_core::types::DbId;
use pilakon_db::models::comic::{Comic, Panel};
use pilakon_db::repositories::ComicRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ComicListResponse {
    pub comics: Vec<Comic>,
}

#[derive(Debug, Serialize)]
pub struct PanelListResponse {
    pub panels: Vec<Panel>,
}

// ---------------------------------------------------------------------------
// Comics
// ---------------------------------------------------------------------------

/// GET /api/comics
///
/// The caller's comics, newest first.
pub async fn list_comics(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<Json<ComicListResponse>> {
    let comics = ComicRepo::list_by_user(&state.pool, session.user_id).await?;
    Ok(Json(ComicListResponse { comics }))
}

/// POST /api/comics
///
/// Comic creation is not available yet.
pub async fn create_comic() -> AppResult<Json<Comic>> {
    Err(AppError::NotImplemented("Not implemented yet".into()))
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

/// GET /api/comics/{id}/panels
///
/// Panels of one of the caller's comics in display order. Comics owned by
/// someone else are reported as not found.
pub async fn list_panels(
    session: Session,
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
) -> AppResult<Json<PanelListResponse>> {
    ComicRepo::find_owned(&state.pool, comic_id, session.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comic",
            id: comic_id,
        }))?;

    let panels = ComicRepo::list_panels(&state.pool, comic_id).await?;
    Ok(Json(PanelListResponse { panels }))
}
