//! Built-in minimal schema used when no taxonomy document can be loaded.

use crate::taxonomy::types::{
    FacetConfig, FunctionCategories, OrderedMap, SearchConfig, Structure, TaxonomyConfig,
};

/// Color returned for tags that belong to no category.
pub const DEFAULT_TAG_COLOR: &str = "#6B7280";

/// Searchable fields and their weights when the schema does not configure them.
pub const DEFAULT_WEIGHTINGS: [(&str, u32); 6] = [
    ("title", 3),
    ("description", 2),
    ("function", 2),
    ("tags", 1),
    ("type", 1),
    ("tier", 1),
];

/// Five core types, three tiers, three complexity levels, no categories.
pub fn fallback_config() -> TaxonomyConfig {
    TaxonomyConfig {
        structure: Structure {
            types: vec![
                FacetConfig::new("GPT", "GPT", "bot", "#8B5CF6"),
                FacetConfig::new("Platform", "Platform", "layers", "#3B82F6"),
                FacetConfig::new("Tool", "Tool", "wrench", "#10B981"),
                FacetConfig::new("Doc", "Document", "file-text", "#F59E0B"),
                FacetConfig::new("Video", "Video", "video", "#EF4444"),
            ],
            tiers: vec![
                FacetConfig::new("Foundation", "Foundation", "unlock", "#10B981"),
                FacetConfig::new("Specialist", "Specialist", "star", "#8B5CF6"),
                FacetConfig::new("Restricted", "Restricted", "lock", "#EF4444"),
            ],
            complexity: vec![
                FacetConfig::new("Beginner", "Beginner", "circle", "#10B981"),
                FacetConfig::new("Intermediate", "Intermediate", "circle-half", "#F59E0B"),
                FacetConfig::new("Advanced", "Advanced", "circle-full", "#EF4444"),
            ],
        },
        function_categories: FunctionCategories {
            groups: OrderedMap::new(),
        },
        tag_categories: OrderedMap::new(),
        search_config: SearchConfig {
            searchable_fields: DEFAULT_WEIGHTINGS
                .iter()
                .map(|(field, _)| field.to_string())
                .collect(),
            weightings: DEFAULT_WEIGHTINGS
                .iter()
                .map(|(field, weight)| (field.to_string(), *weight))
                .collect(),
        },
    }
}
