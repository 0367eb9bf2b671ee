//! In-memory implementation of EntityStore for testing and development

use crate::core::Entity;
use crate::storage::EntityStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory entity store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryStore<T> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> InMemoryStore<T> {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for InMemoryStore<T> {
    async fn insert(&self, entity: T) -> Result<T> {
        let mut data = self
            .data
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        data.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let data = self
            .data
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(data.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let data = self
            .data
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(data.values().cloned().collect())
    }

    async fn replace(&self, id: &Uuid, entity: T) -> Result<Option<T>> {
        let mut data = self
            .data
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !data.contains_key(id) {
            return Ok(None);
        }

        data.insert(*id, entity.clone());

        Ok(Some(entity))
    }

    async fn remove(&self, id: &Uuid) -> Result<Option<T>> {
        let mut data = self
            .data
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(data.remove(id))
    }

    async fn count(&self) -> Result<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(data.len())
    }
}
