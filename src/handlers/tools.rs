//! Catalog endpoints: faceted filtering and filter-option enumeration.

use crate::catalog::Tool;
use crate::error::{AppError, Result};
use crate::search::{sort_tools, FilterState, SortSpec};
use crate::state::AppState;
use crate::taxonomy::FilterOptions;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub filters: FilterState,
    #[serde(default)]
    pub sort: SortSpec,
    /// Tools to filter. When absent the loaded catalog is used.
    #[serde(default)]
    pub tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    /// Size of the collection before filtering.
    pub total: usize,
    pub count: usize,
    pub tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub revision: String,
    #[serde(flatten)]
    pub options: FilterOptions,
}

/// POST /tools/filter - Search, filter and sort a tool collection.
///
/// # Flow
/// 1. Validate caller-supplied tools against `MAX_TOOLS`
/// 2. Run the filter pipeline (search first, then each facet)
/// 3. Apply the requested sort (relevance keeps pipeline order)
pub async fn filter_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<FilterResponse>> {
    let start_time = std::time::Instant::now();

    let supplied = request.tools;
    if let Some(tools) = &supplied {
        check_tool_limit(tools.len(), state.config.max_tools)?;
    }
    let tools: &[Tool] = supplied.as_deref().unwrap_or(&state.catalog.tools[..]);

    let mut matched = state.engine.apply(tools, &request.filters);
    sort_tools(&mut matched, request.sort);

    let response = FilterResponse {
        total: tools.len(),
        count: matched.len(),
        tools: matched.into_iter().cloned().collect(),
    };

    tracing::info!(
        total = response.total,
        count = response.count,
        search_term = %request.filters.search_term,
        elapsed_us = start_time.elapsed().as_micros() as u64,
        "Filter completed"
    );

    metrics::counter!("filter_requests_total").increment(1);
    metrics::histogram!("filter_result_size").record(response.count as f64);

    Ok(Json(response))
}

/// GET /tools/options - Facet values present in the loaded catalog.
pub async fn options_handler(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        revision: state.catalog.revision.clone(),
        options: state.taxonomy.filter_options(&state.catalog.tools),
    })
}

pub(crate) fn check_tool_limit(len: usize, max_tools: usize) -> Result<()> {
    if len > max_tools {
        return Err(AppError::ValidationError(format!(
            "Maximum {} tools per request",
            max_tools
        )));
    }
    Ok(())
}
