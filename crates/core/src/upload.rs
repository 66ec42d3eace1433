//! Upload rules: accepted image types, size cap, and object naming.

use crate::error::CoreError;
use crate::types::UserId;

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted by `POST /api/upload`.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/webp",
    "image/svg+xml",
];

/// Default storage bucket for user uploads.
pub const DEFAULT_UPLOAD_BUCKET: &str = "user-uploads";

/// Reject content types outside [`ALLOWED_MIME_TYPES`].
pub fn validate_mime_type(mime_type: Option<&str>) -> Result<(), CoreError> {
    match mime_type {
        Some(mime) if ALLOWED_MIME_TYPES.contains(&mime) => Ok(()),
        _ => Err(CoreError::Validation("Invalid file type".into())),
    }
}

/// Reject files larger than [`MAX_UPLOAD_BYTES`].
pub fn validate_size(size_bytes: u64) -> Result<(), CoreError> {
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation("File too large".into()));
    }
    Ok(())
}

/// Asset display name derived from an uploaded file name: everything before
/// the first `.`, or the whole name when that prefix is empty.
pub fn asset_name_from_filename(filename: &str) -> &str {
    match filename.split('.').next() {
        Some(stem) if !stem.is_empty() => stem,
        _ => filename,
    }
}

/// File extension for the stored object.
///
/// Taken from the text after the last `.` of the file name; when there is
/// none, derived from the MIME type.
pub fn file_extension(filename: &str, mime_type: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
        _ => extension_for_mime(mime_type).to_string(),
    }
}

fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        _ => "bin",
    }
}

/// Storage path for a new upload: `{user_id}/{random}.{ext}`.
pub fn object_path(user_id: UserId, extension: &str) -> String {
    format!("{user_id}/{}.{extension}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn allowed_types_pass() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(validate_mime_type(Some(mime)).is_ok(), "{mime}");
        }
    }

    #[test]
    fn text_plain_is_rejected() {
        assert_matches!(
            validate_mime_type(Some("text/plain")),
            Err(CoreError::Validation(msg)) if msg == "Invalid file type"
        );
    }

    #[test]
    fn missing_type_is_rejected() {
        assert!(validate_mime_type(None).is_err());
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(validate_size(MAX_UPLOAD_BYTES).is_ok());
        assert_matches!(
            validate_size(11 * 1024 * 1024),
            Err(CoreError::Validation(msg)) if msg == "File too large"
        );
    }

    #[test]
    fn asset_name_stops_at_first_dot() {
        assert_eq!(asset_name_from_filename("dragonfly.png"), "dragonfly");
        assert_eq!(asset_name_from_filename("hero.final.webp"), "hero");
        assert_eq!(asset_name_from_filename("castle"), "castle");
        assert_eq!(asset_name_from_filename(".hidden"), ".hidden");
    }

    #[test]
    fn extension_prefers_filename() {
        assert_eq!(file_extension("Dragon.PNG", "image/png"), "png");
        assert_eq!(file_extension("sketch", "image/svg+xml"), "svg");
        assert_eq!(file_extension("trailing.", "image/jpeg"), "jpg");
    }

    #[test]
    fn object_path_is_scoped_to_user() {
        let user = uuid::Uuid::new_v4();
        let path = object_path(user, "png");
        assert!(path.starts_with(&format!("{user}/")));
        assert!(path.ends_with(".png"));
        assert_ne!(object_path(user, "png"), path);
    }
}
