//! Lightweight read path for surfaces that only need a search box.

use crate::catalog::Tool;
use crate::search::ranker::{FieldWeights, SearchRanker};

/// Case-insensitive substring match on title, description and tags.
///
/// Unweighted and unranked: matching tools keep their input order. A blank
/// term returns every tool.
pub fn local_search<'a>(tools: &'a [Tool], term: &str) -> Vec<&'a Tool> {
    SearchRanker::new(FieldWeights::local()).matching(tools, term)
}
