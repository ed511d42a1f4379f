//! Weighted substring ranking over tool records.
//!
//! Matching is plain case-insensitive containment: no tokenization, no
//! stemming, no fuzziness. Each searchable field that contains the term adds
//! its weight once; tags count once no matter how many of them match.

use crate::catalog::Tool;
use crate::taxonomy::{SearchConfig, DEFAULT_WEIGHTINGS};

/// Per-field weights. A zero weight takes the field out of matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldWeights {
    pub title: u32,
    pub description: u32,
    pub function: u32,
    pub tags: u32,
    pub kind: u32,
    pub tier: u32,
}

impl FieldWeights {
    /// Title 3, description 2, function 2, tags/type/tier 1.
    pub fn standard() -> Self {
        let mut weights = Self::default();
        for (field, weight) in DEFAULT_WEIGHTINGS {
            weights.set(field, weight);
        }
        weights
    }

    /// Title, description and tags only, all equal.
    pub fn local() -> Self {
        Self {
            title: 1,
            description: 1,
            tags: 1,
            ..Self::default()
        }
    }

    /// Derive weights from the taxonomy's search config.
    ///
    /// With no `searchableFields` every known field is searchable. Otherwise
    /// only the listed fields are. A field's weight comes from `weightings`
    /// when present and from the standard table otherwise.
    pub fn from_config(config: &SearchConfig) -> Self {
        let standard = Self::standard();
        let mut weights = Self::default();

        let fields: Vec<&str> = if config.searchable_fields.is_empty() {
            DEFAULT_WEIGHTINGS.iter().map(|(f, _)| *f).collect()
        } else {
            config.searchable_fields.iter().map(String::as_str).collect()
        };

        for field in fields {
            let weight = config
                .weightings
                .get(field)
                .copied()
                .or_else(|| standard.get(field));
            match weight {
                Some(weight) => weights.set(field, weight),
                None => tracing::debug!(field, "Ignoring unknown searchable field"),
            }
        }

        weights
    }

    fn get(&self, field: &str) -> Option<u32> {
        match field {
            "title" => Some(self.title),
            "description" => Some(self.description),
            "function" => Some(self.function),
            "tags" => Some(self.tags),
            "type" => Some(self.kind),
            "tier" => Some(self.tier),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, weight: u32) {
        match field {
            "title" => self.title = weight,
            "description" => self.description = weight,
            "function" => self.function = weight,
            "tags" => self.tags = weight,
            "type" => self.kind = weight,
            "tier" => self.tier = weight,
            _ => {}
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchRanker {
    weights: FieldWeights,
}

impl SearchRanker {
    pub fn new(weights: FieldWeights) -> Self {
        Self { weights }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(FieldWeights::from_config(config))
    }

    pub fn weights(&self) -> FieldWeights {
        self.weights
    }

    /// Score `tool` against an already lower-cased term.
    pub fn score(&self, tool: &Tool, term_lower: &str) -> u32 {
        let w = &self.weights;
        let hit = |weight: u32, value: Option<&str>| -> u32 {
            match value {
                Some(v) if weight > 0 && v.to_lowercase().contains(term_lower) => weight,
                _ => 0,
            }
        };

        let tags = if w.tags > 0
            && tool
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(term_lower))
        {
            w.tags
        } else {
            0
        };

        hit(w.title, Some(tool.title.as_str()))
            + hit(w.description, tool.description.as_deref())
            + hit(w.function, tool.function.as_deref())
            + tags
            + hit(w.kind, Some(tool.kind.as_str()))
            + hit(w.tier, tool.tier.as_deref())
    }

    /// Tools scoring above zero, with title matches first.
    ///
    /// A blank term returns every tool in its original order. Beyond the
    /// title split the order is the input order; the numeric score does not
    /// reorder results.
    pub fn search<'a>(&self, tools: &'a [Tool], term: &str) -> Vec<&'a Tool> {
        if term.trim().is_empty() {
            return tools.iter().collect();
        }
        let term = term.to_lowercase();

        let mut matches: Vec<(bool, &Tool)> = tools
            .iter()
            .filter(|tool| self.score(tool, &term) > 0)
            .map(|tool| (tool.title.to_lowercase().contains(&term), tool))
            .collect();

        // stable: title hits first, input order otherwise
        matches.sort_by_key(|(title_hit, _)| !*title_hit);

        matches.into_iter().map(|(_, tool)| tool).collect()
    }

    /// Tools scoring above zero, in input order.
    pub fn matching<'a>(&self, tools: &'a [Tool], term: &str) -> Vec<&'a Tool> {
        if term.trim().is_empty() {
            return tools.iter().collect();
        }
        let term = term.to_lowercase();

        tools
            .iter()
            .filter(|tool| self.score(tool, &term) > 0)
            .collect()
    }
}

impl Default for SearchRanker {
    fn default() -> Self {
        Self::new(FieldWeights::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tool(id: &str, title: &str) -> Tool {
        Tool::new(id, title, "Tool")
    }

    fn ids(tools: &[&Tool]) -> Vec<String> {
        tools.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_blank_term_is_identity() {
        let tools = vec![tool("b", "Beta"), tool("a", "Alpha"), tool("c", "Gamma")];
        let ranker = SearchRanker::default();

        assert_eq!(ids(&ranker.search(&tools, "")), ["b", "a", "c"]);
        assert_eq!(ids(&ranker.search(&tools, "   ")), ["b", "a", "c"]);
    }

    #[test]
    fn test_standard_weights_sum_matching_fields() {
        let mut t = tool("1", "Prompt Kit");
        t.description = Some("Reusable prompt snippets".into());
        t.function = Some("Prompt Engineering".into());
        t.tags = vec!["prompts".into(), "prompting".into()];
        t.tier = Some("Foundation".into());

        // title 3 + description 2 + function 2 + tags once 1
        assert_eq!(SearchRanker::default().score(&t, "prompt"), 8);
        assert_eq!(SearchRanker::default().score(&t, "tool"), 1);
        assert_eq!(SearchRanker::default().score(&t, "zzz"), 0);
    }

    #[test]
    fn test_zero_score_excluded() {
        let mut hit = tool("1", "Notebook");
        hit.tags = vec!["data".into()];
        let miss = tool("2", "Slides");

        let tools = [hit, miss];
        let results = SearchRanker::default().search(&tools, "data");
        assert_eq!(ids(&results), ["1"]);
    }

    #[test]
    fn test_title_matches_sort_first_and_stay_stable() {
        let mut desc_only = tool("1", "Guide");
        desc_only.description = Some("All about react hooks".into());
        let title_a = tool("2", "React Docs");
        let mut desc_only_b = tool("3", "Cookbook");
        desc_only_b.description = Some("React recipes".into());
        let title_b = tool("4", "react-query");

        let tools = vec![desc_only, title_a, desc_only_b, title_b];
        let results = SearchRanker::default().search(&tools, "React");

        assert_eq!(ids(&results), ["2", "4", "1", "3"]);
    }

    #[test]
    fn test_higher_score_does_not_reorder() {
        let mut rich = tool("1", "Other");
        rich.description = Some("gpt".into());
        rich.function = Some("gpt".into());
        let mut plain = tool("2", "Helper");
        plain.tags = vec!["gpt".into()];

        let tools = vec![plain, rich];
        assert_eq!(ids(&SearchRanker::default().search(&tools, "gpt")), ["2", "1"]);
    }

    #[test]
    fn test_case_insensitive() {
        let mut a = tool("1", "GPT-4 Code Assistant");
        a.kind = "GPT".into();
        let b = tool("2", "Docs");
        let tools = vec![a, b];
        let ranker = SearchRanker::default();

        assert_eq!(ids(&ranker.search(&tools, "GPT")), ids(&ranker.search(&tools, "gpt")));
        assert_eq!(ids(&ranker.search(&tools, "gpt")), ["1"]);
    }

    #[test]
    fn test_missing_optional_fields_score_zero() {
        let bare = tool("1", "Bare");
        assert_eq!(SearchRanker::default().score(&bare, "description"), 0);
    }

    #[test]
    fn test_searchable_fields_restrict_matching() {
        let config = SearchConfig {
            searchable_fields: vec!["title".into(), "tags".into(), "owner".into()],
            weightings: HashMap::from([("tags".to_string(), 4)]),
        };
        let weights = FieldWeights::from_config(&config);

        assert_eq!(weights.title, 3);
        assert_eq!(weights.tags, 4);
        assert_eq!(weights.description, 0);
        assert_eq!(weights.kind, 0);

        let mut t = tool("1", "Notebook");
        t.description = Some("python".into());
        assert!(SearchRanker::new(weights).search(&[t], "python").is_empty());
    }

    #[test]
    fn test_empty_config_uses_standard_weights() {
        assert_eq!(
            FieldWeights::from_config(&SearchConfig::default()),
            FieldWeights::standard()
        );
    }

    #[test]
    fn test_matching_keeps_input_order() {
        let mut first = tool("1", "Guide");
        first.description = Some("figma tips".into());
        let second = tool("2", "Figma");

        let tools = vec![first, second];
        assert_eq!(ids(&SearchRanker::default().matching(&tools, "figma")), ["1", "2"]);
    }
}
