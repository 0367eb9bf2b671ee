//! Field value types used for generic filtering and sorting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
///
/// Entities expose their sortable/filterable fields through this type so the
/// repository can compare values without knowing the concrete entity struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Compare two field values for sorting purposes.
    ///
    /// Values of the same variant compare naturally; UUIDs compare on their
    /// string form. Nulls sort before everything else. Mismatched variants
    /// return `Ordering::Equal` so an invalid comparison never reorders.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => a.to_string().cmp(&b.to_string()),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Null, _) => Ordering::Less,
            (_, FieldValue::Null) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }

    /// Check equality against a raw JSON value, coercing where sensible.
    ///
    /// Used by exact-match filter predicates where the filter value arrives
    /// as untyped request input.
    pub fn matches_json(&self, value: &serde_json::Value) -> bool {
        match self {
            FieldValue::String(s) => value.as_str() == Some(s.as_str()),
            FieldValue::Integer(i) => value.as_i64() == Some(*i),
            FieldValue::Float(f) => value.as_f64() == Some(*f),
            FieldValue::Boolean(b) => value.as_bool() == Some(*b),
            FieldValue::Uuid(u) => value.as_str() == Some(u.to_string().as_str()),
            FieldValue::DateTime(d) => value.as_str() == Some(d.to_rfc3339().as_str()),
            FieldValue::Null => value.is_null(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<Uuid> for FieldValue {
    fn from(u: Uuid) -> Self {
        FieldValue::Uuid(u)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(d: DateTime<Utc>) -> Self {
        FieldValue::DateTime(d)
    }
}
