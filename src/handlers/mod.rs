pub mod health;
pub mod search;
pub mod taxonomy;
pub mod tools;

pub use health::{health_handler, ready_handler};
pub use search::search_handler;
pub use taxonomy::{facet_handler, report_handler, tag_color_handler, taxonomy_handler};
pub use tools::{filter_handler, options_handler};

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// All API routes. Metrics and middleware are layered on by the binary.
pub fn api_router(max_body_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        // Catalog endpoints - callers may post their own tool collections
        .route(
            "/tools/filter",
            post(filter_handler).layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .route(
            "/tools/search",
            post(search_handler).layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .route("/tools/options", get(options_handler))
        // Taxonomy lookups
        .route("/taxonomy", get(taxonomy_handler))
        .route("/taxonomy/report", get(report_handler))
        .route("/taxonomy/tags/:tag", get(tag_color_handler))
        .route("/taxonomy/facets/:facet/:value", get(facet_handler))
        // Health endpoints
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
}
