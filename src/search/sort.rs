//! Ordering of filtered results.

use crate::catalog::Tool;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Keep the order produced by search and filtering.
    #[default]
    Relevance,
    Title,
    /// `date_modified`, falling back to `date_created`.
    LastUpdated,
    /// `date_added`, falling back to `date_created`.
    DateAdded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

/// Stable sort in place. Undated tools go last whichever way dates run.
pub fn sort_tools(tools: &mut [&Tool], spec: SortSpec) {
    match spec.key {
        SortKey::Relevance => {}
        SortKey::Title => tools.sort_by(|a, b| {
            let ord = a.title.to_lowercase().cmp(&b.title.to_lowercase());
            match spec.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        }),
        SortKey::LastUpdated => sort_by_date(tools, spec.order, Tool::last_updated),
        SortKey::DateAdded => sort_by_date(tools, spec.order, Tool::added_on),
    }
}

fn sort_by_date(tools: &mut [&Tool], order: SortOrder, date: fn(&Tool) -> Option<&str>) {
    tools.sort_by(|a, b| {
        let a = date(a).and_then(parse_timestamp);
        let b = date(b).and_then(parse_timestamp);
        match (a, b) {
            (Some(a), Some(b)) => match order {
                SortOrder::Asc => a.cmp(&b),
                SortOrder::Desc => b.cmp(&a),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// Seconds since the epoch for RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}
