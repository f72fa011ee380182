//! S3 backend. One object per document, JSON bodies.

use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;
use tracing::debug;

use crate::error::StorageError;
use crate::store::{BoxFuture, DocumentStore};

pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the AWS default chain (env, profile, IMDS).
    pub async fn connect(bucket: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self::new(Client::new(&config), bucket)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match e.into_service_error() {
                err if err.is_no_such_key() => StorageError::NotFound {
                    key: key.to_string(),
                },
                err => StorageError::GetObject(err.to_string()),
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::GetObject(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn write(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/json")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::PutObject(e.into_service_error().to_string()))?;

        debug!(bucket = %self.bucket, key, "document written");
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page =
                page.map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;
            keys.extend(page.contents().iter().filter_map(|o| o.key().map(str::to_string)));
        }

        keys.sort();
        Ok(keys)
    }
}

impl DocumentStore for S3Store {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StorageError>> {
        Box::pin(self.read(key))
    }

    fn put<'a>(&'a self, key: &'a str, body: Vec<u8>) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(self.write(key, body))
    }

    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(self.keys(prefix))
    }
}
