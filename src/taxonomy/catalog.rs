//! Read-only views over a loaded taxonomy.
//!
//! A [`TaxonomyCatalog`] is built once at startup and shared behind an `Arc`.
//! Nothing here mutates after construction, so concurrent requests can read
//! it freely.

use crate::catalog::Tool;
use crate::error::TaxonomyLoadError;
use crate::taxonomy::fallback::{fallback_config, DEFAULT_TAG_COLOR};
use crate::taxonomy::types::{FacetConfig, FunctionGroup, OrderedMap, TagCategory, TaxonomyConfig};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Where a taxonomy document comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TaxonomySource {
    File(PathBuf),
    Url(String),
    /// An already-parsed document, typically injected by tests or embedders.
    Inline(Value),
}

impl TaxonomySource {
    /// `http://` and `https://` strings become URLs, anything else a file path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for TaxonomySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
            Self::Inline(_) => f.write_str("inline"),
        }
    }
}

/// How the active schema was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaxonomyOrigin {
    Loaded { source: String },
    Fallback { reason: String },
}

/// Facet values present in a tool collection, plus schema display metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub types: Vec<String>,
    pub tiers: Vec<String>,
    pub complexity: Vec<String>,
    pub functions: Vec<String>,
    /// Group keys declared by the schema, in schema order.
    pub function_groups: Vec<String>,
    pub tags: Vec<String>,
    pub type_configs: Vec<FacetConfig>,
    pub tier_configs: Vec<FacetConfig>,
    pub complexity_configs: Vec<FacetConfig>,
    pub function_group_configs: OrderedMap<FunctionGroup>,
    pub tag_categories: OrderedMap<TagCategory>,
}

#[derive(Debug, Clone)]
pub struct TaxonomyCatalog {
    config: TaxonomyConfig,
    origin: TaxonomyOrigin,
}

impl TaxonomyCatalog {
    /// Wrap an already-validated schema.
    pub fn new(config: TaxonomyConfig) -> Self {
        Self {
            config,
            origin: TaxonomyOrigin::Loaded {
                source: "inline".to_string(),
            },
        }
    }

    /// The built-in schema, recording why it is in use.
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            config: fallback_config(),
            origin: TaxonomyOrigin::Fallback {
                reason: reason.into(),
            },
        }
    }

    /// Single best-effort attempt to read and parse a taxonomy document.
    pub fn load(
        source: Option<&TaxonomySource>,
        http_timeout: Duration,
    ) -> Result<TaxonomyConfig, TaxonomyLoadError> {
        let source = source.ok_or(TaxonomyLoadError::MissingSource)?;

        let config: TaxonomyConfig = match source {
            TaxonomySource::File(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| TaxonomyLoadError::Io {
                        path: path.clone(),
                        source: e,
                    })?;
                serde_json::from_str(&content)?
            }
            TaxonomySource::Url(url) => {
                let client = reqwest::blocking::Client::builder()
                    .timeout(http_timeout)
                    .build()?;
                let body = client.get(url).send()?.error_for_status()?.text()?;
                serde_json::from_str(&body)?
            }
            TaxonomySource::Inline(value) => serde_json::from_value(value.clone())?,
        };

        Ok(config)
    }

    /// Load from `source`, substituting the built-in schema on any failure.
    ///
    /// Blocks when the source is a URL; call from a blocking context.
    pub fn load_or_fallback(source: Option<&TaxonomySource>, http_timeout: Duration) -> Self {
        match Self::load(source, http_timeout) {
            Ok(config) => {
                let source = source.map(ToString::to_string).unwrap_or_default();
                tracing::info!(
                    source = %source,
                    types = config.structure.types.len(),
                    function_groups = config.function_categories.groups.len(),
                    tag_categories = config.tag_categories.len(),
                    "Taxonomy loaded"
                );
                Self {
                    config,
                    origin: TaxonomyOrigin::Loaded { source },
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Taxonomy unavailable, using built-in schema");
                Self::fallback(e.to_string())
            }
        }
    }

    pub fn config(&self) -> &TaxonomyConfig {
        &self.config
    }

    pub fn origin(&self) -> &TaxonomyOrigin {
        &self.origin
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, TaxonomyOrigin::Fallback { .. })
    }

    pub fn type_config(&self, kind: &str) -> Option<&FacetConfig> {
        self.config.structure.types.iter().find(|c| c.id == kind)
    }

    pub fn tier_config(&self, tier: &str) -> Option<&FacetConfig> {
        self.config.structure.tiers.iter().find(|c| c.id == tier)
    }

    pub fn complexity_config(&self, complexity: &str) -> Option<&FacetConfig> {
        self.config.structure.complexity.iter().find(|c| c.id == complexity)
    }

    /// Color of the first tag category (in schema order) listing `tag`.
    pub fn tag_color(&self, tag: &str) -> &str {
        self.config
            .tag_categories
            .values()
            .find(|category| category.tags.iter().any(|t| t == tag))
            .map(|category| category.color.as_str())
            .unwrap_or(DEFAULT_TAG_COLOR)
    }

    /// Union of the `functions` lists of the given group keys. Unknown keys
    /// contribute nothing.
    pub fn functions_in_groups<S: AsRef<str>>(&self, group_keys: &[S]) -> HashSet<&str> {
        group_keys
            .iter()
            .filter_map(|key| self.config.function_categories.groups.get(key.as_ref()))
            .flat_map(|group| group.functions.iter().map(String::as_str))
            .collect()
    }

    pub fn filter_options(&self, tools: &[Tool]) -> FilterOptions {
        let structure = &self.config.structure;

        FilterOptions {
            types: distinct_sorted(tools.iter().map(|t| Some(t.kind.as_str()))),
            tiers: distinct_sorted(tools.iter().map(|t| t.tier.as_deref())),
            complexity: distinct_sorted(tools.iter().map(|t| t.complexity.as_deref())),
            functions: extract_functions_from_tools(tools),
            function_groups: self.config.function_categories.groups.keys().cloned().collect(),
            tags: extract_tags_from_tools(tools),
            type_configs: structure.types.clone(),
            tier_configs: structure.tiers.clone(),
            complexity_configs: structure.complexity.clone(),
            function_group_configs: self.config.function_categories.groups.clone(),
            tag_categories: self.config.tag_categories.clone(),
        }
    }
}

impl Default for TaxonomyCatalog {
    fn default() -> Self {
        Self::fallback("no taxonomy source configured")
    }
}

/// Every tag used across `tools`, deduplicated and sorted.
pub fn extract_tags_from_tools(tools: &[Tool]) -> Vec<String> {
    distinct_sorted(tools.iter().flat_map(|t| t.tags.iter().map(|s| Some(s.as_str()))))
}

/// Every `function` label used across `tools`, deduplicated and sorted.
pub fn extract_functions_from_tools(tools: &[Tool]) -> Vec<String> {
    distinct_sorted(tools.iter().map(|t| t.function.as_deref()))
}

fn distinct_sorted<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .flatten()
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
