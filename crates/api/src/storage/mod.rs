//! Object storage for uploaded files.
//!
//! Handlers only see the [`ObjectStorage`] trait; `main` injects the hosted
//! [`SupabaseStorage`] client and tests inject [`MemoryStorage`].

pub mod memory;
pub mod supabase;

use async_trait::async_trait;
use axum::body::Bytes;
use pilakon_core::upload::DEFAULT_UPLOAD_BUCKET;

pub use memory::MemoryStorage;
pub use supabase::SupabaseStorage;

/// Errors from the object storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// An object already exists at the target path.
    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    /// The storage service returned a non-2xx status code.
    #[error("Storage API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Bucket-scoped object store.
///
/// Paths are relative to the bucket, e.g. `{user_id}/{random}.png`.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` at `path`. Never overwrites; returns the stored path.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Publicly readable URL of an object. Does not check that it exists.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Delete the given objects. Missing paths are ignored.
    async fn remove(&self, bucket: &str, paths: &[String]) -> StorageResult<()>;

    /// Names of up to `limit` objects under `prefix`.
    async fn list(&self, bucket: &str, prefix: &str, limit: usize) -> StorageResult<Vec<String>>;
}

/// Storage service endpoint and bucket.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base URL of the hosted service, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Public (anon) API key.
    pub anon_key: String,
    /// Bucket receiving user uploads.
    pub upload_bucket: String,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var             | Required | Default        |
    /// |---------------------|----------|----------------|
    /// | `SUPABASE_URL`      | **yes**  | --             |
    /// | `SUPABASE_ANON_KEY` | **yes**  | --             |
    /// | `UPLOAD_BUCKET`     | no       | `user-uploads` |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing.
    pub fn from_env() -> Self {
        let url = std::env::var("SUPABASE_URL").expect("SUPABASE_URL must be set");
        let anon_key = std::env::var("SUPABASE_ANON_KEY").expect("SUPABASE_ANON_KEY must be set");
        let upload_bucket =
            std::env::var("UPLOAD_BUCKET").unwrap_or_else(|_| DEFAULT_UPLOAD_BUCKET.into());

        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
            upload_bucket,
        }
    }
}
