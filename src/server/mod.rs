//! HTTP exposure: resource routers, handlers, and response documents

pub mod handlers;
pub mod response;

pub use handlers::{ResourceConfig, ResourceState, resource_routes};
pub use response::{CollectionDocument, ItemDocument, PageLinks, PaginationMeta};

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Merge per-resource routers into one service router with request tracing
/// and permissive CORS
pub fn service_router(resource_routers: Vec<Router>) -> Router {
    let mut app = Router::new();
    for router in resource_routers {
        app = app.merge(router);
    }
    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Initialize tracing with the standard env-filter setup.
///
/// Call once at startup; respects `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
