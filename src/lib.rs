//! Zeno Knows - catalog, taxonomy and search service for AI tool assets
//!
//! This library exposes the taxonomy catalog, the search ranker and the
//! facet filter engine, plus the HTTP handlers that serve them, so they can
//! be embedded elsewhere and exercised by integration tests.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod search;
pub mod server;
pub mod state;
pub mod taxonomy;

// Re-export key types for convenience
pub use catalog::{load_tools, parse_tools, Tool, ToolCatalog};
pub use config::Config;
pub use error::{AppError, Result, TaxonomyLoadError};
pub use handlers::{api_router, filter_handler, health_handler, ready_handler, search_handler};
pub use search::{local_search, FilterEngine, FilterState, SearchRanker, SortKey, SortOrder, SortSpec};
pub use server::serve_with_drain;
pub use state::AppState;
pub use taxonomy::{FilterOptions, TaxonomyCatalog, TaxonomyConfig, TaxonomySource};
