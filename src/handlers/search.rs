//! Quick search for surfaces that only need a search box.
//!
//! Unlike `/tools/filter` this does no facet filtering and no ranking:
//! matching tools come back in catalog order.

use crate::catalog::Tool;
use crate::error::Result;
use crate::handlers::tools::check_tool_limit;
use crate::search::local_search;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free text matched against title, description and tags
    #[serde(default)]
    pub query: String,
    /// Tools to search. When absent the loaded catalog is used.
    #[serde(default)]
    pub tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub tools: Vec<Tool>,
}

/// POST /tools/search - Substring search over title, description and tags.
///
/// An empty query returns the whole collection.
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    if let Some(tools) = &request.tools {
        check_tool_limit(tools.len(), state.config.max_tools)?;
    }
    let tools: &[Tool] = request.tools.as_deref().unwrap_or(&state.catalog.tools[..]);

    let results: Vec<Tool> = local_search(tools, &request.query)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(
        query = %request.query,
        count = results.len(),
        "Local search completed"
    );

    metrics::counter!("search_requests_total").increment(1);

    Ok(Json(SearchResponse {
        count: results.len(),
        tools: results,
    }))
}
