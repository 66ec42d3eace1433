//! In-process object store used by tests and local runs without a storage
//! service.

use std::collections::BTreeMap;

use async_trait::async_trait;
use axum::body::Bytes;
use tokio::sync::RwLock;

use super::{ObjectStorage, StorageError, StorageResult};

/// A stored object.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
}

/// Objects keyed by `(bucket, path)`.
pub struct MemoryStorage {
    base_url: String,
    objects: RwLock<BTreeMap<(String, String), StoredObject>>,
}

impl MemoryStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    pub async fn get(&self, bucket: &str, path: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .await
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        let mut objects = self.objects.write().await;
        let key = (bucket.to_string(), path.to_string());
        if objects.contains_key(&key) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        objects.insert(
            key,
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(path.to_string())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{bucket}/{path}", self.base_url)
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> StorageResult<()> {
        let mut objects = self.objects.write().await;
        for path in paths {
            objects.remove(&(bucket.to_string(), path.clone()));
        }
        Ok(())
    }

    async fn list(&self, bucket: &str, prefix: &str, limit: usize) -> StorageResult<Vec<String>> {
        let objects = self.objects.read().await;
        Ok(objects
            .keys()
            .filter(|(b, p)| b == bucket && p.starts_with(prefix))
            .take(limit)
            .map(|(_, p)| p.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn upload_never_overwrites() {
        let storage = MemoryStorage::new("http://mem");
        storage
            .upload("b", "u/a.png", Bytes::from_static(b"one"), "image/png")
            .await
            .unwrap();

        let err = storage
            .upload("b", "u/a.png", Bytes::from_static(b"two"), "image/png")
            .await
            .unwrap_err();
        assert_matches!(err, StorageError::AlreadyExists(path) if path == "u/a.png");

        let stored = storage.get("b", "u/a.png").await.unwrap();
        assert_eq!(stored.data.as_ref(), b"one");
    }

    #[tokio::test]
    async fn remove_and_list_are_bucket_scoped() {
        let storage = MemoryStorage::new("http://mem");
        for (bucket, path) in [("b", "u/1.png"), ("b", "u/2.png"), ("other", "u/3.png")] {
            storage
                .upload(bucket, path, Bytes::from_static(b"x"), "image/png")
                .await
                .unwrap();
        }

        assert_eq!(storage.list("b", "u/", 10).await.unwrap().len(), 2);

        storage.remove("b", &["u/1.png".to_string()]).await.unwrap();
        assert_eq!(storage.list("b", "", 10).await.unwrap(), vec!["u/2.png"]);
        assert_eq!(storage.len().await, 2);
    }
}
