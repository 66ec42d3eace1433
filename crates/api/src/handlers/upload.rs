//! Handler for image uploads into the shared asset library.

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use pilakon_core::error::CoreError;
use pilakon_core::upload::{
    asset_name_from_filename, file_extension, object_path, validate_mime_type, validate_size,
};
use pilakon_db::models::asset::{Asset, CreateAsset};
use pilakon_db::repositories::AssetRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub asset: Asset,
    pub public_url: String,
}

/// The `file` part of an upload form.
struct UploadedFile {
    filename: String,
    content_type: String,
    data: Bytes,
}

/// POST /api/upload
///
/// Accepts a multipart form with a required `file` field. The image is
/// stored under the caller's folder and a public asset row is created for
/// it. If the row cannot be written the stored object is removed again.
pub async fn upload_asset(
    session: Session,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let file = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest("No file provided".into()))?;

    let bucket = state.config.storage.upload_bucket.as_str();
    let extension = file_extension(&file.filename, &file.content_type);
    let path = object_path(session.user_id, &extension);
    let file_size = file.data.len() as i64;

    let stored_path = state
        .storage
        .upload(bucket, &path, file.data, &file.content_type)
        .await?;
    let public_url = state.storage.public_url(bucket, &stored_path);

    let input = CreateAsset {
        name: asset_name_from_filename(&file.filename).to_string(),
        description: None,
        file_path: stored_path.clone(),
        public_url: public_url.clone(),
        category_id: None,
        tags: Vec::new(),
        file_size: Some(file_size),
        mime_type: Some(file.content_type),
        uploaded_by: session.user_id,
        is_public: true,
    };

    let asset = match AssetRepo::create(&state.pool, &input).await {
        Ok(asset) => asset,
        Err(err) => {
            if let Err(cleanup) = state.storage.remove(bucket, &[stored_path.clone()]).await {
                tracing::warn!(
                    error = %cleanup,
                    path = %stored_path,
                    "Failed to remove orphaned upload",
                );
            }
            return Err(err.into());
        }
    };

    tracing::info!(
        asset_id = %asset.id,
        user_id = %session.user_id,
        email = session.email.as_deref(),
        file_size,
        path = %stored_path,
        "Asset uploaded",
    );

    Ok(Json(UploadResponse {
        success: true,
        asset,
        public_url,
    }))
}

/// Read the `file` field, checking its type before the body and its size
/// while streaming. Other fields are skipped.
async fn read_file_field(multipart: &mut Multipart) -> AppResult<Option<UploadedFile>> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        validate_mime_type(content_type.as_deref())?;

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            data.extend_from_slice(&chunk);
            validate_size(data.len() as u64)?;
        }

        return Ok(Some(UploadedFile {
            filename,
            content_type: content_type.unwrap_or_default(),
            data: Bytes::from(data),
        }));
    }

    Ok(None)
}

/// Bodies cut off by the route's size limit surface as "File too large".
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(CoreError::Validation("File too large".into()))
    } else {
        AppError::BadRequest(err.body_text())
    }
}
