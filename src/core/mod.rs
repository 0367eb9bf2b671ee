//! Core module containing fundamental traits and types

pub mod entity;
pub mod error;
pub mod field;
pub mod policy;
pub mod query;
pub mod validation;

pub use entity::{Entity, EntityPayload};
pub use error::{ApiError, ApiResult};
pub use field::FieldValue;
pub use policy::{FilterPolicy, OrderPolicy, SortKey};
pub use query::{Page, PagerConfig, QuerySpec, SortDirection};
