//! Entity traits defining the core abstraction for stored resources

use crate::core::error::ApiError;
use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Base trait for all entities managed by a repository.
///
/// All entities have:
/// - id: Unique identifier
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
///
/// Field access is exposed generically through [`Entity::field`] so the
/// repository can sort and match on whitelisted keys without knowing the
/// concrete struct.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "users", "companies")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "user", "company")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the value of a field by name.
    ///
    /// `id` and `created_at` must always resolve since they are the default
    /// order keys. Returns None for unknown field names.
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Uuid(self.id())),
            "created_at" => Some(FieldValue::DateTime(self.created_at())),
            "updated_at" => Some(FieldValue::DateTime(self.updated_at())),
            _ => None,
        }
    }
}

/// Trait for entities that can be built and patched from write documents.
///
/// The HTTP layer deserializes a JSON:API write document, validates its
/// shape, and hands the `attributes` object to these constructors. Malformed
/// attribute payloads surface as [`ApiError::Validation`].
pub trait EntityPayload: Entity {
    /// Build a new entity from an `attributes` object
    fn from_attributes(attributes: &Value) -> Result<Self, ApiError>;

    /// Apply an `attributes` object to an existing entity.
    ///
    /// Implementations should treat absent keys as "leave unchanged" and
    /// bump `updated_at`.
    fn merge_attributes(&mut self, attributes: &Value) -> Result<(), ApiError>;
}
