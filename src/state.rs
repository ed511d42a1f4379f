use crate::catalog::{load_tools, ToolCatalog};
use crate::config::Config;
use crate::error::Result;
use crate::search::FilterEngine;
use crate::taxonomy::TaxonomyCatalog;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all request handlers.
/// Read-only after construction.
pub struct AppState {
    pub taxonomy: Arc<TaxonomyCatalog>,
    pub engine: FilterEngine,
    /// Tools served when a request does not supply its own.
    pub catalog: Arc<ToolCatalog>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Load the taxonomy (falling back to the built-in schema) and the
    /// optional tool catalog.
    ///
    /// Blocks on network I/O when the taxonomy source is a URL.
    ///
    /// # Errors
    /// A configured `TOOLS_PATH` that cannot be loaded is fatal; a missing
    /// or broken taxonomy is not.
    pub fn new(config: Config) -> Result<Self> {
        let taxonomy = TaxonomyCatalog::load_or_fallback(
            config.taxonomy_source.as_ref(),
            Duration::from_secs(config.http_timeout_secs),
        );

        let catalog = match &config.tools_path {
            Some(path) => load_tools(path)?,
            None => {
                tracing::info!("TOOLS_PATH not set, serving an empty catalog");
                ToolCatalog::default()
            }
        };

        Ok(Self::from_parts(taxonomy, catalog, config))
    }

    /// Assemble state from already-loaded parts.
    pub fn from_parts(taxonomy: TaxonomyCatalog, catalog: ToolCatalog, config: Config) -> Self {
        let report = taxonomy.consistency_report(&catalog.tools);
        if !report.is_clean() {
            tracing::warn!(
                undeclared_types = ?report.undeclared_types,
                undeclared_tiers = ?report.undeclared_tiers,
                undeclared_complexity = ?report.undeclared_complexity,
                ungrouped_functions = report.ungrouped_functions.len(),
                uncategorized_tags = report.uncategorized_tags.len(),
                ambiguous_functions = ?report.ambiguous_functions,
                ambiguous_tags = ?report.ambiguous_tags,
                "Taxonomy and catalog disagree"
            );
        }

        metrics::gauge!("taxonomy_fallback_active").set(if taxonomy.is_fallback() {
            1.0
        } else {
            0.0
        });

        if config.tools_path.is_some() && catalog.is_empty() {
            tracing::warn!("TOOLS_PATH is set but the catalog is empty, reporting not ready");
        }

        let taxonomy = Arc::new(taxonomy);
        Self {
            engine: FilterEngine::new(Arc::clone(&taxonomy)),
            taxonomy,
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }

    /// Ready unless a catalog file was configured and yielded no tools.
    /// Without `TOOLS_PATH` the service only filters caller-supplied tools.
    pub fn is_ready(&self) -> bool {
        self.config.tools_path.is_none() || !self.catalog.is_empty()
    }
}
