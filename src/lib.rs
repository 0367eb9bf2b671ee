//! # apibase
//!
//! Building blocks for JSON:API-style REST resources in Rust.
//!
//! ## Features
//!
//! - **Whitelisted Filtering**: every filter name is bound to an explicit
//!   predicate; unknown names reject the request before storage is touched
//! - **Whitelisted Ordering**: single-key sorting restricted to an allowed
//!   set (`id` and `created_at` by default)
//! - **Pagination**: default page size of 10, hard ceiling of 1000, both
//!   configurable per repository
//! - **Envelope Serialization**: entities render as
//!   `{ "type", "id", "attributes", ...meta }` with the id always a string
//! - **Typed Errors**: every caller mistake maps to a specific error variant
//!   and a structured 4xx response
//! - **Storage-Agnostic**: repositories work over any [`storage::EntityStore`]
//!   implementation; an in-memory store ships for tests and development
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apibase::prelude::*;
//!
//! let repository = Repository::new(InMemoryStore::new())
//!     .with_filter_policy(FilterPolicy::new().allow_contains("title"))
//!     .with_order_policy(OrderPolicy::default().allow("title"));
//!
//! let state = ResourceState::new(repository, ArticleMapper, ResourceConfig::new()
//!     .filter_param("title"));
//!
//! let app = service_router(vec![resource_routes(state)]);
//! ```

pub mod core;
pub mod mapper;
pub mod repository;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::core::{
        ApiError, ApiResult, Entity, EntityPayload, FieldValue, FilterPolicy, OrderPolicy, Page,
        PagerConfig, QuerySpec, SortDirection, SortKey,
    };
    pub use crate::mapper::{Envelope, RequestContext, ResourceMapper};
    pub use crate::repository::Repository;
    pub use crate::server::{
        ResourceConfig, ResourceState, init_tracing, resource_routes, service_router,
    };
    pub use crate::storage::{EntityStore, InMemoryStore};
}
