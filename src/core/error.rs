//! Typed error handling for resource operations
//!
//! Every failure a caller can trigger maps to a specific variant, so HTTP
//! handlers and library consumers can match on the exact case instead of
//! unwrapping a generic `anyhow::Error`.
//!
//! # Error categories
//!
//! - [`ApiError::InvalidFilter`]: unknown filter key or malformed filter payload
//! - [`ApiError::InvalidOrder`]: unknown sort key or direction
//! - [`ApiError::PagerLimitExceeded`]: requested page size over the hard ceiling
//! - [`ApiError::NotFound`]: entity lookup miss
//! - [`ApiError::Validation`]: malformed create/update payload
//! - [`ApiError::Storage`]: underlying store failure (the only 5xx)

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Result alias for operations that fail with [`ApiError`]
pub type ApiResult<T> = Result<T, ApiError>;

/// The error type for all resource operations
#[derive(Debug)]
pub enum ApiError {
    /// Filter key not whitelisted, or no usable filter info provided
    InvalidFilter(String),

    /// Order key not whitelisted, or sort direction not `asc`/`desc`
    InvalidOrder,

    /// Requested page size exceeds the configured hard ceiling
    PagerLimitExceeded { limit: usize, max: usize },

    /// Entity lookup miss
    NotFound { resource: String, id: String },

    /// Malformed create/update payload, with per-field messages
    Validation {
        errors: IndexMap<String, Vec<String>>,
    },

    /// Underlying store failure
    Storage(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidFilter(detail) => write!(f, "Invalid filtering: {}", detail),
            ApiError::InvalidOrder => write!(f, "Cannot order entities by given key"),
            ApiError::PagerLimitExceeded { limit, max } => {
                write!(f, "Pager limit {} exceeds maximum of {}", limit, max)
            }
            ApiError::NotFound { resource, id } => {
                write!(f, "No {} found with id {}", resource, id)
            }
            ApiError::Validation { .. } => write!(f, "The given data was invalid."),
            ApiError::Storage(detail) => write!(f, "Storage error: {}", detail),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(err.to_string())
    }
}

/// Single error object within the `errors` array of an error response
#[derive(Debug, Serialize)]
pub struct ErrorObject {
    /// HTTP status code, rendered as a string
    pub status: String,
    /// Human-readable error message
    pub detail: String,
}

/// Error response body: `{ "errors": [ { "status", "detail" } ] }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub errors: Vec<ErrorObject>,
}

/// Validation error response body: `{ "message", "errors": { field: [msgs] } }`
#[derive(Debug, Serialize)]
pub struct ValidationBody {
    pub message: String,
    pub errors: IndexMap<String, Vec<String>>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidOrder => StatusCode::BAD_REQUEST,
            ApiError::PagerLimitExceeded { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidFilter(_) => "INVALID_FILTER",
            ApiError::InvalidOrder => "INVALID_ORDER",
            ApiError::PagerLimitExceeded { .. } => "PAGER_LIMIT_EXCEEDED",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Validation { .. } => "VALIDATION_FAILED",
            ApiError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Build a single-field validation error
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = IndexMap::new();
        errors.insert(field.into(), vec![message.into()]);
        ApiError::Validation { errors }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation { errors } => {
                let body = ValidationBody {
                    message: "The given data was invalid.".to_string(),
                    errors,
                };
                (status, Json(body)).into_response()
            }
            other => {
                let body = ErrorBody {
                    errors: vec![ErrorObject {
                        status: status.as_u16().to_string(),
                        detail: other.to_string(),
                    }],
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
