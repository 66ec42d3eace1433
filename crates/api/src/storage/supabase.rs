//! REST client for the hosted storage API.

use async_trait::async_trait;
use axum::body::Bytes;
use serde::Deserialize;

use super::{ObjectStorage, StorageConfig, StorageError, StorageResult};

/// HTTP client for the storage service of a hosted project.
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Response of a successful object upload.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    /// `{bucket}/{path}` of the stored object.
    #[serde(rename = "Key")]
    key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListedObject {
    name: String,
}

impl SupabaseStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.anon_key.clone(),
        }
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{path}", self.base_url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    // ---- private helpers ----

    /// Map non-2xx responses to [`StorageError`].
    async fn ensure_success(
        response: reqwest::Response,
        path: &str,
    ) -> StorageResult<reqwest::Response> {
        let status = response.status();
        if status == reqwest::StatusCode::CONFLICT {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StorageError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        let response = self
            .authorized(self.client.post(self.object_url(bucket, path)))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .header(reqwest::header::CACHE_CONTROL, "max-age=3600")
            .body(data)
            .send()
            .await?;

        let body: UploadResponse = Self::ensure_success(response, path).await?.json().await?;

        let prefix = format!("{bucket}/");
        let stored = body
            .key
            .as_deref()
            .and_then(|key| key.strip_prefix(&prefix))
            .unwrap_or(path)
            .to_string();
        Ok(stored)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> StorageResult<()> {
        let response = self
            .authorized(
                self.client
                    .delete(format!("{}/storage/v1/object/{bucket}", self.base_url)),
            )
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await?;

        Self::ensure_success(response, bucket).await?;
        Ok(())
    }

    async fn list(&self, bucket: &str, prefix: &str, limit: usize) -> StorageResult<Vec<String>> {
        let response = self
            .authorized(
                self.client
                    .post(format!("{}/storage/v1/object/list/{bucket}", self.base_url)),
            )
            .json(&serde_json::json!({
                "prefix": prefix,
                "limit": limit,
                "offset": 0,
            }))
            .send()
            .await?;

        let objects: Vec<ListedObject> =
            Self::ensure_success(response, bucket).await?.json().await?;
        Ok(objects.into_iter().map(|o| o.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseStorage {
        SupabaseStorage::new(&StorageConfig {
            url: "https://proj.supabase.co/".into(),
            anon_key: "anon".into(),
            upload_bucket: "user-uploads".into(),
        })
    }

    #[test]
    fn public_url_points_at_public_object_route() {
        assert_eq!(
            client().public_url("user-uploads", "u1/abc.png"),
            "https://proj.supabase.co/storage/v1/object/public/user-uploads/u1/abc.png"
        );
    }

    #[test]
    fn object_url_has_no_double_slash() {
        assert_eq!(
            client().object_url("b", "p.png"),
            "https://proj.supabase.co/storage/v1/object/b/p.png"
        );
    }
}
