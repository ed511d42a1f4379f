//! Free-text search, facet filtering and result ordering.

pub mod filter;
pub mod local;
pub mod ranker;
pub mod sort;

pub use filter::{FilterEngine, FilterState};
pub use local::local_search;
pub use ranker::{FieldWeights, SearchRanker};
pub use sort::{sort_tools, SortKey, SortOrder, SortSpec};
