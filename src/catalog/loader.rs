//! Catalog loading: turns a `{"tools": [...]}` document into [`Tool`] records.
//!
//! Entries are parsed one at a time. A malformed entry is logged and skipped
//! rather than failing the whole catalog (partial success model); only a
//! document where every entry fails is rejected.

use crate::catalog::types::Tool;
use crate::error::AppError;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

/// Result type for loader operations
pub type LoaderResult<T> = std::result::Result<T, AppError>;

/// The set of tools served when a request does not bring its own.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    pub tools: Vec<Tool>,
    /// SHA-256 hex fingerprint of the catalog contents.
    pub revision: String,
}

impl ToolCatalog {
    pub fn new(tools: Vec<Tool>) -> Self {
        let revision = compute_revision(&tools);
        Self { tools, revision }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Read and parse a catalog file.
pub fn load_tools(path: &Path) -> LoaderResult<ToolCatalog> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::CatalogError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let json: Value = serde_json::from_str(&content)
        .map_err(|e| AppError::CatalogError(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    let tools = parse_tools(&json)?;

    tracing::info!(
        path = %path.display(),
        count = tools.len(),
        "Tool catalog loaded"
    );

    Ok(ToolCatalog::new(tools))
}

/// Parse tool records out of a catalog document.
///
/// Accepts `{"tools": [...]}` or a bare array. Entries missing `id`, `title`
/// or `url`/`link` are skipped, as are repeated ids (first one wins).
///
/// # Errors
/// Returns `AppError::CatalogError` if the document has no tools array, or if
/// it has entries but none of them parse.
pub fn parse_tools(json: &Value) -> LoaderResult<Vec<Tool>> {
    let entries = extract_tools_array(json)?;

    let mut results = Vec::with_capacity(entries.len());
    let mut seen: HashSet<String> = HashSet::with_capacity(entries.len());

    for (idx, entry) in entries.iter().enumerate() {
        match normalize_tool(entry) {
            Ok(tool) => {
                if !seen.insert(tool.id.clone()) {
                    tracing::warn!(index = idx, id = %tool.id, "Skipping duplicate tool id");
                    continue;
                }
                results.push(tool);
            }
            Err(e) => {
                tracing::warn!(
                    index = idx,
                    error = %e,
                    "Skipping malformed tool record"
                );
            }
        }
    }

    if results.is_empty() && !entries.is_empty() {
        return Err(AppError::CatalogError(
            "All tool records failed to parse".into(),
        ));
    }

    tracing::debug!(
        total = entries.len(),
        parsed = results.len(),
        "Tool records parsed"
    );

    Ok(results)
}

fn extract_tools_array(json: &Value) -> LoaderResult<&Vec<Value>> {
    if let Some(array) = json.as_array() {
        return Ok(array);
    }
    json.get("tools")
        .and_then(|t| t.as_array())
        .ok_or_else(|| AppError::CatalogError("Expected a 'tools' array in catalog document".into()))
}

fn normalize_tool(entry: &Value) -> LoaderResult<Tool> {
    let tool: Tool = serde_json::from_value(entry.clone())
        .map_err(|e| AppError::CatalogError(format!("Invalid tool record: {}", e)))?;

    for (field, value) in [("id", &tool.id), ("title", &tool.title), ("url", &tool.url)] {
        if value.trim().is_empty() {
            return Err(AppError::CatalogError(format!(
                "Tool record missing required '{}' field",
                field
            )));
        }
    }

    Ok(tool)
}

/// Fingerprint ids, titles and modification dates in catalog order.
pub fn compute_revision(tools: &[Tool]) -> String {
    let mut hasher = Sha256::new();

    for tool in tools {
        hasher.update(tool.id.as_bytes());
        hasher.update(b"|");
        hasher.update(tool.title.as_bytes());
        hasher.update(b"|");
        hasher.update(tool.last_updated().unwrap_or("").as_bytes());
        hasher.update(b"\n");
    }

    hex::encode(hasher.finalize())
}
