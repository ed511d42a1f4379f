//! Tool catalog: the record type and loading of catalog documents.

pub mod loader;
pub mod types;

pub use loader::{compute_revision, load_tools, parse_tools, LoaderResult, ToolCatalog};
pub use types::Tool;
