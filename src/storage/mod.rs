//! Storage abstraction and backends

pub mod in_memory;

pub use in_memory::InMemoryStore;

use crate::core::Entity;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Store trait for a single entity type
///
/// Implementations provide the raw persistence operations; the repository
/// layers filtering, ordering, and pagination on top. The crate is agnostic
/// to the underlying storage mechanism, and atomicity of each operation is
/// the store's responsibility.
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    /// Insert a new entity
    async fn insert(&self, entity: T) -> Result<T>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all entities
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing entity, returning the stored value or None when
    /// the id is absent
    async fn replace(&self, id: &Uuid, entity: T) -> Result<Option<T>>;

    /// Remove an entity, returning it or None when the id is absent
    async fn remove(&self, id: &Uuid) -> Result<Option<T>>;

    /// Count all entities
    async fn count(&self) -> Result<usize>;
}
