use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::StoreError;

/// Untyped key-value storage for one named collection
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Insert or replace
    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Deleting a missing key is not an error
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// All entries in insertion order
    async fn list(&self) -> Result<Vec<(String, Value)>, StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<IndexMap<String, Value>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Backend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.shift_remove(key);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<(String, Value)>, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.entries.write().await.clear();
        Ok(())
    }
}

/// One pretty-printed JSON object per collection, rewritten on every change
pub struct JsonFileBackend {
    path: PathBuf,
    entries: RwLock<Option<IndexMap<String, Value>>>,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: RwLock::new(None),
        }
    }

    async fn load(&self) -> Result<IndexMap<String, Value>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(IndexMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(IndexMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn flush(&self, entries: &IndexMap<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&self.path, bytes).await?;
        tracing::trace!("Wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Apply `change` to the cached map and persist the result
    async fn mutate<F>(&self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut IndexMap<String, Value>) + Send,
    {
        let mut guard = self.entries.write().await;
        let mut entries = match guard.take() {
            Some(entries) => entries,
            None => self.load().await?,
        };
        change(&mut entries);
        let result = self.flush(&entries).await;
        *guard = Some(entries);
        result
    }

    async fn read<R, F>(&self, view: F) -> Result<R, StoreError>
    where
        F: FnOnce(&IndexMap<String, Value>) -> R + Send,
        R: Send,
    {
        {
            let guard = self.entries.read().await;
            if let Some(entries) = guard.as_ref() {
                return Ok(view(entries));
            }
        }

        let mut guard = self.entries.write().await;
        let entries = match guard.take() {
            Some(entries) => entries,
            None => self.load().await?,
        };
        let result = view(&entries);
        *guard = Some(entries);
        Ok(result)
    }
}

#[async_trait::async_trait]
impl Backend for JsonFileBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.read(|entries| entries.get(key).cloned()).await
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let key = key.to_string();
        self.mutate(move |entries| {
            entries.insert(key, value);
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.mutate(|entries| {
            entries.shift_remove(key);
        })
        .await
    }

    async fn list(&self) -> Result<Vec<(String, Value)>, StoreError> {
        self.read(|entries| {
            entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.mutate(|entries| entries.clear()).await
    }
}
