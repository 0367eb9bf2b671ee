//! Write document validation
//!
//! Create/update requests carry a JSON:API write document:
//!
//! ```json
//! { "data": { "type": "orders", "id": "...", "attributes": { ... } } }
//! ```
//!
//! The document shape is validated before any store access; failures carry
//! per-field message lists and surface as HTTP 422.

use crate::core::error::ApiError;
use indexmap::IndexMap;
use serde_json::Value;

/// Validate a create document: `data.type` must be a string and
/// `data.attributes` must be present. Returns the attributes object.
pub fn validate_post_document(doc: &Value) -> Result<&Value, ApiError> {
    let mut errors: IndexMap<String, Vec<String>> = IndexMap::new();
    let data = doc.get("data");

    if data
        .and_then(|d| d.get("type"))
        .and_then(Value::as_str)
        .is_none()
    {
        errors.insert(
            "data.type".into(),
            vec!["The data.type field is required and must be a string.".into()],
        );
    }

    let attributes = data.and_then(|d| d.get("attributes"));
    if attributes.is_none() {
        errors.insert(
            "data.attributes".into(),
            vec!["The data.attributes field must be present.".into()],
        );
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation { errors });
    }

    Ok(attributes.unwrap_or(&Value::Null))
}

/// Validate an update document: same as create, plus `data.id` is required
/// and `data.attributes` must not be null. Returns the attributes object.
pub fn validate_patch_document(doc: &Value) -> Result<&Value, ApiError> {
    let mut errors: IndexMap<String, Vec<String>> = IndexMap::new();
    let data = doc.get("data");

    if data
        .and_then(|d| d.get("type"))
        .and_then(Value::as_str)
        .is_none()
    {
        errors.insert(
            "data.type".into(),
            vec!["The data.type field is required and must be a string.".into()],
        );
    }

    if data
        .and_then(|d| d.get("id"))
        .map(Value::is_null)
        .unwrap_or(true)
    {
        errors.insert(
            "data.id".into(),
            vec!["The data.id field is required.".into()],
        );
    }

    let attributes = data.and_then(|d| d.get("attributes"));
    if attributes.map(Value::is_null).unwrap_or(true) {
        errors.insert(
            "data.attributes".into(),
            vec!["The data.attributes field is required.".into()],
        );
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation { errors });
    }

    Ok(attributes.unwrap_or(&Value::Null))
}

// Attribute validators. These are building blocks for EntityPayload
// implementations; each returns the error message for one field check.

/// Validator: field is required (present and not null)
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_null() {
            Err(format!("The {} field is required.", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: field must be a string when present
pub fn string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_null() || value.is_string() {
            Ok(())
        } else {
            Err(format!("The {} field must be a string.", field))
        }
    }
}

/// Validator: string length must not exceed `max` characters
pub fn max_length(max: usize) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if s.chars().count() > max {
                return Err(format!(
                    "The {} field must not exceed {} characters.",
                    field, max
                ));
            }
        }
        Ok(())
    }
}

/// Validator: field must be an integer when present
pub fn integer() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_null() || value.is_i64() || value.is_u64() {
            Ok(())
        } else {
            Err(format!("The {} field must be an integer.", field))
        }
    }
}

/// Run validators against one attribute and collect failures into `errors`.
///
/// A missing attribute key is treated as null, so `required()` catches it.
pub fn check_attribute(
    attributes: &Value,
    field: &str,
    validators: &[&dyn Fn(&str, &Value) -> Result<(), String>],
    errors: &mut IndexMap<String, Vec<String>>,
) {
    let value = attributes.get(field).cloned().unwrap_or(Value::Null);
    for validator in validators {
        if let Err(message) = validator(field, &value) {
            errors
                .entry(format!("data.attributes.{}", field))
                .or_default()
                .push(message);
        }
    }
}

/// Finish a validation pass: empty errors means success
pub fn finish(errors: IndexMap<String, Vec<String>>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation { errors })
    }
}
