use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::StoreError;
use crate::backend::Backend;

/// Typed view over a backend collection
pub struct Collection<T> {
    name: &'static str,
    backend: Arc<dyn Backend>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            backend: self.backend.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    pub fn new(name: &'static str, backend: Arc<dyn Backend>) -> Self {
        Self {
            name,
            backend,
            _marker: PhantomData,
        }
    }

    pub async fn get(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.backend.get(key).await?.is_some())
    }

    pub async fn put(&self, key: &str, item: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(item)?;
        self.backend.put(key, value).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(key).await
    }

    /// Every item; entries that no longer decode are skipped
    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        let entries = self.backend.list().await?;
        let mut items = Vec::with_capacity(entries.len());

        for (key, value) in entries {
            match serde_json::from_value(value) {
                Ok(item) => items.push(item),
                Err(e) => tracing::warn!("Skipping undecodable {}/{}: {}", self.name, key, e),
            }
        }

        Ok(items)
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.backend.clear().await
    }

    /// Delete by a secondary field; returns how many entries went away
    pub async fn delete_where<F>(&self, mut matches: F) -> Result<usize, StoreError>
    where
        F: FnMut(&T) -> bool + Send,
    {
        let mut removed = 0;

        for (key, value) in self.backend.list().await? {
            let hit = serde_json::from_value::<T>(value)
                .map(|item| matches(&item))
                .unwrap_or(false);
            if hit {
                self.backend.delete(&key).await?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}
