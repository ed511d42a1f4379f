//! Drift detection between the taxonomy and the data that uses it.

use crate::catalog::Tool;
use crate::taxonomy::catalog::TaxonomyCatalog;
use crate::taxonomy::types::FacetConfig;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Values used by tools that the schema does not account for, plus entries
/// the schema lists more than once. Each list is deduplicated and sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsistencyReport {
    pub undeclared_types: Vec<String>,
    pub undeclared_tiers: Vec<String>,
    pub undeclared_complexity: Vec<String>,
    pub ungrouped_functions: Vec<String>,
    pub uncategorized_tags: Vec<String>,
    /// Function labels listed in more than one function group.
    pub ambiguous_functions: Vec<String>,
    /// Tags listed in more than one tag category.
    pub ambiguous_tags: Vec<String>,
}

impl ConsistencyReport {
    pub fn is_clean(&self) -> bool {
        self.undeclared_types.is_empty()
            && self.undeclared_tiers.is_empty()
            && self.undeclared_complexity.is_empty()
            && self.ungrouped_functions.is_empty()
            && self.uncategorized_tags.is_empty()
            && self.ambiguous_functions.is_empty()
            && self.ambiguous_tags.is_empty()
    }
}

impl TaxonomyCatalog {
    pub fn consistency_report(&self, tools: &[Tool]) -> ConsistencyReport {
        let config = self.config();
        let grouped: HashSet<&str> = config
            .function_categories
            .groups
            .values()
            .flat_map(|g| g.functions.iter().map(String::as_str))
            .collect();
        let categorized: HashSet<&str> = config
            .tag_categories
            .values()
            .flat_map(|c| c.tags.iter().map(String::as_str))
            .collect();

        ConsistencyReport {
            undeclared_types: undeclared(
                &config.structure.types,
                tools.iter().map(|t| Some(t.kind.as_str())),
            ),
            undeclared_tiers: undeclared(
                &config.structure.tiers,
                tools.iter().map(|t| t.tier.as_deref()),
            ),
            undeclared_complexity: undeclared(
                &config.structure.complexity,
                tools.iter().map(|t| t.complexity.as_deref()),
            ),
            ungrouped_functions: missing_from(
                &grouped,
                tools.iter().filter_map(|t| t.function.as_deref()),
            ),
            uncategorized_tags: missing_from(
                &categorized,
                tools.iter().flat_map(|t| t.tags.iter().map(String::as_str)),
            ),
            ambiguous_functions: listed_twice(
                config.function_categories.groups.values().map(|g| &g.functions),
            ),
            ambiguous_tags: listed_twice(config.tag_categories.values().map(|c| &c.tags)),
        }
    }
}

fn undeclared<'a>(
    declared: &[FacetConfig],
    used: impl Iterator<Item = Option<&'a str>>,
) -> Vec<String> {
    let declared: HashSet<&str> = declared.iter().map(|c| c.id.as_str()).collect();
    missing_from(&declared, used.flatten())
}

fn missing_from<'a>(known: &HashSet<&str>, used: impl Iterator<Item = &'a str>) -> Vec<String> {
    used.filter(|v| !v.is_empty() && !known.contains(v))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn listed_twice<'a>(lists: impl Iterator<Item = &'a Vec<String>>) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for list in lists {
        // a value repeated inside one bucket is not ambiguous
        let unique: HashSet<&str> = list.iter().map(String::as_str).collect();
        for value in unique {
            *counts.entry(value).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(v, _)| v.to_string())
        .collect()
}
