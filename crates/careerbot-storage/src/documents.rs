use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::store::DocumentStore;

/// Load and deserialize a JSON document.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    key: &str,
) -> Result<T, StorageError> {
    let body = store.get(key).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Serialize and store a JSON document.
pub async fn save_json<T: Serialize>(
    store: &dyn DocumentStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec(value)?;
    store.put(key, body).await
}
