//! Allowed-origin list resolved from bindings.
//!
//! The host may bind the list under one of several keys and in several
//! encodings (array, comma-separated string, JSON array string). Everything is
//! funnelled through [`RawOriginConfig`] and ends up as an [`AllowList`].
//!
//! Resolution runs on every request. There is no cache, so a changed binding
//! applies to the next request.

use std::collections::HashSet;

use serde_json::Value;

use super::origin::normalize;
use crate::bindings::Bindings;

/// Binding keys looked up in priority order. The first present key wins.
pub const ORIGIN_KEYS: [&str; 4] = [
    "cors_origins",
    "cors_origin",
    "cors_origins_json",
    "cors_origins_list",
];

/// Set of normalized origins. Never contains the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(HashSet<String>);

impl AllowList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Exact match against an already normalized origin.
    pub fn contains(&self, origin: &str) -> bool {
        self.0.contains(origin)
    }
}

impl<S: AsRef<str>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|origin| normalize(Some(origin.as_ref())))
                .filter(|origin| !origin.is_empty())
                .collect(),
        )
    }
}

/// The origin binding as the host supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOriginConfig {
    Absent,
    /// Array binding. Non-string elements are dropped.
    List(Vec<String>),
    /// Comma-separated list, or a JSON array encoded as a string.
    Text(String),
    /// Numbers, booleans, objects.
    Unsupported,
}

impl RawOriginConfig {
    /// Pick the first key in [`ORIGIN_KEYS`] that has a value.
    ///
    /// Presence is what counts: an empty string or empty array on an earlier
    /// key still wins and resolves to an empty list. JSON `null` is absent.
    pub fn select(bindings: &dyn Bindings) -> Self {
        ORIGIN_KEYS
            .iter()
            .find_map(|key| bindings.get(key).filter(|value| !value.is_null()))
            .map(Self::from)
            .unwrap_or(Self::Absent)
    }

    pub fn into_allow_list(self) -> AllowList {
        match self {
            RawOriginConfig::List(items) => items.into_iter().collect(),
            RawOriginConfig::Text(text) => parse_text(&text),
            RawOriginConfig::Absent | RawOriginConfig::Unsupported => AllowList::default(),
        }
    }
}

impl From<Value> for RawOriginConfig {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawOriginConfig::Absent,
            Value::String(text) => RawOriginConfig::Text(text),
            Value::Array(items) => RawOriginConfig::List(string_items(items)),
            _ => RawOriginConfig::Unsupported,
        }
    }
}

/// Resolve the allowed origins for the current request.
pub fn resolve(bindings: &dyn Bindings) -> AllowList {
    RawOriginConfig::select(bindings).into_allow_list()
}

fn parse_text(text: &str) -> AllowList {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return AllowList::default();
    }

    if trimmed.starts_with('[') {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Array(items)) => return string_items(items).into_iter().collect(),
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "invalid cors_origins JSON, falling back to comma list"
                );
            }
        }
    }

    trimmed.split(',').collect()
}

fn string_items(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}
