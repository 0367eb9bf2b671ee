//! Entity-to-envelope serialization
//!
//! A [`ResourceMapper`] turns a domain entity into the normalized output
//! envelope `{ "type", "id", "attributes", ...meta }`. Mapping is a pure
//! transformation: the same entity and context always produce the same
//! envelope, and the id is always rendered as a string.

use crate::core::Entity;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Read-only request context available during mapping
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    params: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Get a query parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }
}

/// Normalized output wrapper around an entity
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: Value,
    /// Extra top-level keys, merged beside type/id/attributes
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

/// Converts a domain entity into an output envelope.
///
/// Implementations supply the resource type and the attributes object;
/// optional extra keys come from [`ResourceMapper::meta`] and are merged at
/// the top level of the envelope.
pub trait ResourceMapper<T: Entity>: Send + Sync {
    /// The `type` value of produced envelopes (e.g., "orders")
    fn resource_type(&self) -> &str;

    /// The attributes object for one entity
    fn attributes(&self, entity: &T, context: &RequestContext) -> Value;

    /// Extra top-level keys, empty by default
    fn meta(&self, _entity: &T, _context: &RequestContext) -> Map<String, Value> {
        Map::new()
    }

    /// Build the full envelope for one entity
    fn to_envelope(&self, entity: &T, context: &RequestContext) -> Envelope {
        Envelope {
            resource_type: self.resource_type().to_string(),
            id: entity.id().to_string(),
            attributes: self.attributes(entity, context),
            meta: self.meta(entity, context),
        }
    }
}
