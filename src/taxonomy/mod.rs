//! Taxonomy: the classification schema and lookups derived from it.
//!
//! The schema declares known types, tiers and complexity levels, groups
//! `function` labels into function groups, buckets tags into colored
//! categories, and configures free-text search weights.

pub mod catalog;
pub mod fallback;
pub mod report;
pub mod types;

pub use catalog::{
    extract_functions_from_tools, extract_tags_from_tools, FilterOptions, TaxonomyCatalog,
    TaxonomyOrigin, TaxonomySource,
};
pub use fallback::{fallback_config, DEFAULT_TAG_COLOR, DEFAULT_WEIGHTINGS};
pub use report::ConsistencyReport;
pub use types::{
    FacetConfig, FunctionCategories, FunctionGroup, OrderedMap, SearchConfig, Structure,
    TagCategory, TaxonomyConfig,
};
