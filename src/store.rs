//! Object store abstraction and backends.
//!
//! Handlers talk to a `dyn ObjectStore` so the S3 backend can be swapped
//! for the in-memory one when running without cloud credentials (and in the
//! integration tests).

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Failure talking to the object store, carrying the underlying message.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    fn from_display(err: impl std::fmt::Display) -> Self {
        Self(err.to_string())
    }
}

/// Bucket operations the handlers need: upload a local file, enumerate
/// keys, and mint a time-limited read URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload the file at `path` under `key`, replacing any existing object.
    async fn put_file(&self, path: &Path, key: &str) -> Result<(), StoreError>;

    /// All keys currently in the bucket.
    async fn list_keys(&self) -> Result<Vec<String>, StoreError>;

    /// Signed URL granting read access to `key` for `expires_in`.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreError>;
}

/// S3-backed store. Credentials and region come from the ambient AWS
/// environment, the same way the boto3 default client resolves them.
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub async fn connect(bucket: &str) -> Self {
        let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self {
            client: Client::new(&shared),
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_file(&self, path: &Path, key: &str) -> Result<(), StoreError> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(StoreError::from_display)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(StoreError::from_display)?;
        info!("Uploaded {} to s3://{}/{}", path.display(), self.bucket, key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(StoreError::from_display)?;
        Ok(response
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreError> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(StoreError::from_display)?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(StoreError::from_display)?;
        Ok(request.uri().to_string())
    }
}

/// In-memory store keyed by object name. Nothing survives the process;
/// "signed" URLs are synthetic with the expiry as a query parameter.
#[derive(Default)]
pub struct MemoryStore {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Object bytes under `key`, if present.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(key).cloned()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_file(&self, path: &Path, key: &str) -> Result<(), StoreError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(StoreError::from_display)?;
        self.objects.write().await.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.objects.read().await.keys().cloned().collect())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreError> {
        if !self.objects.read().await.contains_key(key) {
            return Err(StoreError(format!("no such object: {}", key)));
        }
        Ok(format!("memory:///{}?expires_in={}", key, expires_in.as_secs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.webm");
        std::fs::write(&path, b"fake media bytes").unwrap();

        let store = MemoryStore::new();
        store.put_file(&path, "clip.webm").await.unwrap();

        assert_eq!(store.list_keys().await.unwrap(), vec!["clip.webm"]);
        assert_eq!(store.get("clip.webm").await.unwrap(), b"fake media bytes");
    }

    #[tokio::test]
    async fn memory_store_presigns_only_existing_keys() {
        let store = MemoryStore::new();
        assert!(store
            .presign_get("missing", Duration::from_secs(3600))
            .await
            .is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"x").unwrap();
        store.put_file(&path, "a.txt").await.unwrap();

        let url = store
            .presign_get("a.txt", Duration::from_secs(3600))
            .await
            .unwrap();
        assert_eq!(url, "memory:///a.txt?expires_in=3600");
    }
}
