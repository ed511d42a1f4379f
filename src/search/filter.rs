//! Facet filtering composed with free-text search.
//!
//! Predicates run in a fixed order: search, type, tier, complexity,
//! function, function group, tags, featured. Search establishes the order;
//! every later step is a stable filter that never reorders.
//!
//! Multi-select facets are OR within the facet (`type IN [..]`) except tags,
//! which are AND: a tool must carry every selected tag. Facets combine with
//! AND, so disagreeing facets yield an empty result rather than an error.

use crate::catalog::Tool;
use crate::search::ranker::SearchRanker;
use crate::taxonomy::TaxonomyCatalog;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Active facet selections. An empty list places no constraint on its facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub types: Vec<String>,
    pub tiers: Vec<String>,
    pub complexity: Vec<String>,
    pub functions: Vec<String>,
    pub function_groups: Vec<String>,
    pub tags: Vec<String>,
    /// `None` ignores featured status.
    pub featured: Option<bool>,
    pub search_term: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tiers<S: Into<String>>(mut self, tiers: impl IntoIterator<Item = S>) -> Self {
        self.tiers = tiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_complexity<S: Into<String>>(
        mut self,
        levels: impl IntoIterator<Item = S>,
    ) -> Self {
        self.complexity = levels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_functions<S: Into<String>>(
        mut self,
        functions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.functions = functions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_function_groups<S: Into<String>>(
        mut self,
        groups: impl IntoIterator<Item = S>,
    ) -> Self {
        self.function_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    /// True when no facet and no search term is set.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.tiers.is_empty()
            && self.complexity.is_empty()
            && self.functions.is_empty()
            && self.function_groups.is_empty()
            && self.tags.is_empty()
            && self.featured.is_none()
            && self.search_term.trim().is_empty()
    }
}

/// Stateless filter pipeline bound to one taxonomy.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    taxonomy: Arc<TaxonomyCatalog>,
    ranker: SearchRanker,
}

impl FilterEngine {
    /// Build an engine whose search weights come from the taxonomy.
    pub fn new(taxonomy: Arc<TaxonomyCatalog>) -> Self {
        let ranker = SearchRanker::from_config(&taxonomy.config().search_config);
        Self { taxonomy, ranker }
    }

    pub fn with_ranker(taxonomy: Arc<TaxonomyCatalog>, ranker: SearchRanker) -> Self {
        Self { taxonomy, ranker }
    }

    pub fn taxonomy(&self) -> &TaxonomyCatalog {
        &self.taxonomy
    }

    pub fn ranker(&self) -> &SearchRanker {
        &self.ranker
    }

    /// Run the full pipeline. Neither `tools` nor `filters` is modified.
    pub fn apply<'a>(&self, tools: &'a [Tool], filters: &FilterState) -> Vec<&'a Tool> {
        let mut working: Vec<&Tool> = if filters.search_term.trim().is_empty() {
            tools.iter().collect()
        } else {
            self.ranker.search(tools, &filters.search_term)
        };

        if !filters.types.is_empty() {
            working.retain(|t| contains(&filters.types, Some(t.kind.as_str())));
        }

        if !filters.tiers.is_empty() {
            working.retain(|t| contains(&filters.tiers, t.tier.as_deref()));
        }

        if !filters.complexity.is_empty() {
            working.retain(|t| contains(&filters.complexity, t.complexity.as_deref()));
        }

        if !filters.functions.is_empty() {
            working.retain(|t| contains(&filters.functions, t.function.as_deref()));
        }

        if !filters.function_groups.is_empty() {
            let allowed = self.taxonomy.functions_in_groups(&filters.function_groups);
            working.retain(|t| {
                t.function
                    .as_deref()
                    .is_some_and(|f| allowed.contains(f))
            });
        }

        if !filters.tags.is_empty() {
            working.retain(|t| filters.tags.iter().all(|wanted| t.tags.contains(wanted)));
        }

        if let Some(featured) = filters.featured {
            working.retain(|t| t.featured == Some(featured));
        }

        tracing::debug!(
            input = tools.len(),
            output = working.len(),
            searched = !filters.search_term.trim().is_empty(),
            "Filters applied"
        );

        working
    }
}

fn contains(selected: &[String], value: Option<&str>) -> bool {
    value.is_some_and(|v| selected.iter().any(|s| s == v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::TaxonomyConfig;
    use serde_json::json;

    fn engine() -> FilterEngine {
        let config: TaxonomyConfig = serde_json::from_value(json!({
            "functionCategories": {
                "groups": {
                    "creative": { "name": "Creative", "functions": ["Content & Creative"] },
                    "guides": { "name": "Guides", "functions": ["Best Practice Guides", "Onboarding"] }
                }
            }
        }))
        .unwrap();
        FilterEngine::new(Arc::new(TaxonomyCatalog::new(config)))
    }

    fn scenario_tools() -> Vec<Tool> {
        serde_json::from_value(json!([
            {
                "id": "1", "title": "GPT-4 Code Assistant", "tags": ["coding", "ai"],
                "type": "GPT", "tier": "Specialist", "function": "Content & Creative",
                "featured": true
            },
            {
                "id": "2", "title": "React Docs", "tags": ["react", "frontend"],
                "type": "Doc", "tier": "Foundation", "function": "Best Practice Guides",
                "featured": false
            }
        ]))
        .unwrap()
    }

    fn ids(tools: &[&Tool]) -> Vec<String> {
        tools.iter().map(|t| t.id.clone()).collect()
    }

    fn typed(id: &str, kind: &str) -> Tool {
        Tool::new(id, format!("Item {}", id), kind)
    }

    #[test]
    fn test_empty_state_is_identity() {
        let tools = vec![typed("3", "Video"), typed("1", "GPT"), typed("2", "Doc")];
        let result = engine().apply(&tools, &FilterState::new());

        assert_eq!(ids(&result), ["3", "1", "2"]);
    }

    #[test]
    fn test_scenario_type_filter() {
        let tools = scenario_tools();
        let result = engine().apply(&tools, &FilterState::new().with_types(["GPT"]));
        assert_eq!(ids(&result), ["1"]);
    }

    #[test]
    fn test_scenario_search_term() {
        let tools = scenario_tools();
        let result = engine().apply(&tools, &FilterState::new().with_search_term("react"));
        assert_eq!(ids(&result), ["2"]);
    }

    #[test]
    fn test_scenario_featured() {
        let tools = scenario_tools();
        let result = engine().apply(&tools, &FilterState::new().with_featured(true));
        assert_eq!(ids(&result), ["1"]);
    }

    #[test]
    fn test_type_filter_is_or_and_keeps_order() {
        let tools = vec![
            typed("1", "A"),
            typed("2", "C"),
            typed("3", "B"),
            typed("4", "A"),
        ];
        let result = engine().apply(&tools, &FilterState::new().with_types(["B", "A"]));
        assert_eq!(ids(&result), ["1", "3", "4"]);
    }

    #[test]
    fn test_tier_and_complexity_exclude_missing_fields() {
        let mut a = typed("1", "GPT");
        a.tier = Some("Foundation".into());
        a.complexity = Some("Beginner".into());
        let b = typed("2", "GPT");
        let tools = vec![a, b];

        let by_tier = engine().apply(&tools, &FilterState::new().with_tiers(["Foundation"]));
        assert_eq!(ids(&by_tier), ["1"]);

        let by_level = engine().apply(
            &tools,
            &FilterState::new().with_complexity(["Beginner", "Advanced"]),
        );
        assert_eq!(ids(&by_level), ["1"]);
    }

    #[test]
    fn test_tags_are_and() {
        let mut t = typed("1", "Tool");
        t.tags = vec!["x".into(), "y".into()];
        let tools = vec![t];
        let engine = engine();

        assert_eq!(engine.apply(&tools, &FilterState::new().with_tags(["x"])).len(), 1);
        assert_eq!(engine.apply(&tools, &FilterState::new().with_tags(["x", "y"])).len(), 1);
        assert!(engine.apply(&tools, &FilterState::new().with_tags(["x", "z"])).is_empty());
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let mut t = typed("1", "Tool");
        t.tags = vec!["AI".into()];
        let tools = vec![t];

        assert!(engine().apply(&tools, &FilterState::new().with_tags(["ai"])).is_empty());
    }

    #[test]
    fn test_function_group_expands_to_functions() {
        let mut tools = scenario_tools();
        let mut onboarding = typed("3", "Doc");
        onboarding.function = Some("Onboarding".into());
        tools.push(onboarding);
        tools.push(typed("4", "Doc"));

        let result = engine().apply(&tools, &FilterState::new().with_function_groups(["guides"]));
        assert_eq!(ids(&result), ["2", "3"]);

        let unknown = engine().apply(&tools, &FilterState::new().with_function_groups(["nope"]));
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_function_and_group_filters_intersect() {
        let tools = scenario_tools();
        let state = FilterState::new()
            .with_functions(["Content & Creative"])
            .with_function_groups(["guides"]);

        assert!(engine().apply(&tools, &state).is_empty());
    }

    #[test]
    fn test_featured_false_excludes_unset() {
        let mut off = typed("1", "Tool");
        off.featured = Some(false);
        let unset = typed("2", "Tool");
        let tools = vec![off, unset];

        let result = engine().apply(&tools, &FilterState::new().with_featured(false));
        assert_eq!(ids(&result), ["1"]);
        assert!(engine()
            .apply(&tools, &FilterState::new().with_featured(true))
            .is_empty());
    }

    #[test]
    fn test_later_filters_preserve_search_order() {
        let mut desc_hit = typed("1", "Doc");
        desc_hit.description = Some("notion templates".into());
        let mut title_hit = typed("2", "Doc");
        title_hit.title = "Notion Guide".into();
        let mut other_type = typed("3", "Video");
        other_type.title = "Notion Walkthrough".into();
        let tools = vec![desc_hit, title_hit, other_type];

        let state = FilterState::new()
            .with_search_term("notion")
            .with_types(["Doc"]);
        assert_eq!(ids(&engine().apply(&tools, &state)), ["2", "1"]);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let tools = scenario_tools();
        let before = tools.clone();
        let state = FilterState::new().with_search_term("docs").with_tags(["react"]);
        let state_before = state.clone();

        let _ = engine().apply(&tools, &state);
        assert_eq!(tools, before);
        assert_eq!(state, state_before);
    }

    #[test]
    fn test_filter_state_json_shape() {
        let state: FilterState = serde_json::from_value(json!({
            "types": ["GPT"],
            "functionGroups": ["guides"],
            "featured": null,
            "searchTerm": "react"
        }))
        .unwrap();

        assert_eq!(state.types, ["GPT"]);
        assert_eq!(state.function_groups, ["guides"]);
        assert_eq!(state.featured, None);
        assert_eq!(state.search_term, "react");
        assert!(state.tiers.is_empty());
        assert!(!state.is_empty());
        assert!(FilterState::default().is_empty());
    }
}
