use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::taxonomy::{ConsistencyReport, FacetConfig, TaxonomyConfig, TaxonomyOrigin};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct TaxonomyResponse {
    pub origin: TaxonomyOrigin,
    pub config: TaxonomyConfig,
}

#[derive(Serialize)]
pub struct TagColorResponse {
    pub tag: String,
    pub color: String,
}

#[derive(Serialize)]
pub struct FacetLookupResponse {
    pub facet: String,
    pub value: String,
    /// `null` when the schema has no display metadata for the value.
    pub config: Option<FacetConfig>,
}

/// GET /taxonomy - The active schema and where it came from.
pub async fn taxonomy_handler(State(state): State<Arc<AppState>>) -> Json<TaxonomyResponse> {
    Json(TaxonomyResponse {
        origin: state.taxonomy.origin().clone(),
        config: state.taxonomy.config().clone(),
    })
}

/// GET /taxonomy/tags/:tag - Display color for a tag.
pub async fn tag_color_handler(
    State(state): State<Arc<AppState>>,
    Path(tag): Path<String>,
) -> Json<TagColorResponse> {
    let color = state.taxonomy.tag_color(&tag).to_string();
    Json(TagColorResponse { tag, color })
}

/// GET /taxonomy/facets/:facet/:value - Display metadata for a type, tier or
/// complexity value.
pub async fn facet_handler(
    State(state): State<Arc<AppState>>,
    Path((facet, value)): Path<(String, String)>,
) -> Result<Json<FacetLookupResponse>> {
    let config = match facet.as_str() {
        "types" => state.taxonomy.type_config(&value),
        "tiers" => state.taxonomy.tier_config(&value),
        "complexity" => state.taxonomy.complexity_config(&value),
        _ => {
            return Err(AppError::ValidationError(format!(
                "Unknown facet '{}', expected types, tiers or complexity",
                facet
            )))
        }
    }
    .cloned();

    Ok(Json(FacetLookupResponse {
        facet,
        value,
        config,
    }))
}

/// GET /taxonomy/report - Drift between the schema and the loaded catalog.
pub async fn report_handler(State(state): State<Arc<AppState>>) -> Json<ConsistencyReport> {
    Json(state.taxonomy.consistency_report(&state.catalog.tools))
}
