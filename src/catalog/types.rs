//! Type definitions for the tool catalog.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single catalog entry: an AI tool, document, script or other resource.
///
/// The known fields are typed; anything else found in the source document
/// lands in `extra` and is carried through untouched so that newer records
/// never fail to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Opaque stable identifier, unique within a catalog.
    pub id: String,

    pub title: String,

    /// Open enum: "GPT", "Doc", "Script", "Video", "Platform", "Tool", "Learning Guide", ...
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,

    #[serde(alias = "link", default, deserialize_with = "null_as_default")]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Access level. Absent is treated as open to all by display layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Tri-state: an absent flag matches neither `featured: true` nor `featured: false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tool {
    /// Creates a tool with the required fields set and everything else empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// First non-empty of `date_modified` / `date_created`.
    pub fn last_updated(&self) -> Option<&str> {
        non_empty(&self.date_modified).or_else(|| non_empty(&self.date_created))
    }

    /// First non-empty of `date_added` / `date_created`.
    pub fn added_on(&self) -> Option<&str> {
        non_empty(&self.date_added).or_else(|| non_empty(&self.date_created))
    }
}

/// Database exports write `null` for empty columns; read it as the empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_alias_and_extra_fields() {
        let tool: Tool = serde_json::from_value(json!({
            "id": "7",
            "title": "Prompt Library",
            "type": "Doc",
            "link": "https://example.com/prompts",
            "owner": "platform-team",
            "featured": true
        }))
        .unwrap();

        assert_eq!(tool.url, "https://example.com/prompts");
        assert_eq!(tool.kind, "Doc");
        assert_eq!(tool.featured, Some(true));
        assert_eq!(tool.extra.get("owner"), Some(&json!("platform-team")));
        assert!(tool.tags.is_empty());
    }

    #[test]
    fn test_null_columns_read_as_empty() {
        let tool: Tool = serde_json::from_value(json!({
            "id": "1",
            "title": "GPT Helper",
            "type": null,
            "url": null,
            "tags": null,
            "tier": null,
            "featured": null
        }))
        .unwrap();

        assert_eq!(tool.kind, "");
        assert_eq!(tool.url, "");
        assert!(tool.tags.is_empty());
        assert_eq!(tool.tier, None);
        assert_eq!(tool.featured, None);
        assert!(tool.extra.is_empty());
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let mut tool = Tool::new("1", "Notebook", "Tool");
        tool.extra.insert("rating".into(), json!(4));

        let value = serde_json::to_value(&tool).unwrap();
        assert_eq!(value["rating"], json!(4));
        assert_eq!(value["type"], json!("Tool"));
        assert!(value.get("tier").is_none());
    }

    #[test]
    fn test_last_updated_prefers_modified() {
        let mut tool = Tool::new("1", "A", "GPT");
        tool.date_created = Some("2024-01-01".into());
        assert_eq!(tool.last_updated(), Some("2024-01-01"));

        tool.date_modified = Some("2024-03-01".into());
        assert_eq!(tool.last_updated(), Some("2024-03-01"));

        tool.date_modified = Some("  ".into());
        assert_eq!(tool.last_updated(), Some("2024-01-01"));
    }
}
