//! Document store backends.
//!
//! Records are opaque JSON blobs addressed by key (see
//! `careerbot_core::keys`). The S3 backend is the production store; the
//! memory backend serves tests and throwaway local runs.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::error::StorageError;
use crate::s3::S3Store;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Key/value access to JSON documents.
pub trait DocumentStore: Send + Sync {
    /// Read a document. Missing keys yield `StorageError::NotFound`.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StorageError>>;

    /// Write a document, replacing any previous body under the same key.
    fn put<'a>(&'a self, key: &'a str, body: Vec<u8>) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Keys under `prefix`, in lexicographic order.
    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>>;
}

/// Open a store from a connection string.
///
/// Accepted forms: `s3://{bucket}` and `memory://`. S3 region, credentials
/// and custom endpoints (`AWS_ENDPOINT_URL`) come from the AWS default chain.
pub async fn open(url: &str) -> Result<Arc<dyn DocumentStore>, StorageError> {
    if let Some(bucket) = url.strip_prefix("s3://") {
        let bucket = bucket.trim_end_matches('/');
        if bucket.is_empty() || bucket.contains('/') {
            return Err(StorageError::UnsupportedUrl(url.to_string()));
        }
        info!(bucket, "using S3 document store");
        return Ok(Arc::new(S3Store::connect(bucket).await));
    }

    if url == "memory://" {
        info!("using in-memory document store");
        return Ok(Arc::new(MemoryStore::default()));
    }

    Err(StorageError::UnsupportedUrl(url.to_string()))
}

#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.objects.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.lock().await.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StorageError>> {
        Box::pin(async move {
            self.objects
                .lock()
                .await
                .get(key)
                .cloned()
                .ok_or_else(|| StorageError::NotFound {
                    key: key.to_string(),
                })
        })
    }

    fn put<'a>(&'a self, key: &'a str, body: Vec<u8>) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.objects.lock().await.insert(key.to_string(), body);
            Ok(())
        })
    }

    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(async move {
            Ok(self
                .objects
                .lock()
                .await
                .range(prefix.to_string()..)
                .take_while(|(key, _)| key.starts_with(prefix))
                .map(|(key, _)| key.clone())
                .collect())
        })
    }
}
