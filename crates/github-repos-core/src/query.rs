//! Query parsing: free text plus `key:value` filters.
//!
//! A raw query such as `anime sort:stars order:desc language:Python` is
//! split into free text (`anime`) and an ordered filter mapping
//! (`sort → stars`, `order → desc`, `language → Python`).
//!
//! # Token pattern
//!
//! A filter token is `(\S*) *: *(\S*)`: a run of non-whitespace, optional
//! spaces, a colon, optional spaces, and another run of non-whitespace.
//! Matches are found left to right without overlap. Only matches where
//! both sides are non-empty become filters; the rest (`keyword:`,
//! `:value`) stay in the free text.
//!
//! # Example
//!
//! ```rust
//! use github_repos_core::query::parse_query;
//!
//! let query = parse_query("text1 keyword:value text2");
//! assert_eq!(query.text, "text1  text2");
//! assert_eq!(query.filters.get("keyword"), Some("value"));
//! ```

use regex::Regex;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::sync::LazyLock;

// Constant pattern, initialization cannot fail in practice
static FILTER_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\S*) *: *(\S*)").ok());

/// Filter key pulled out of `q` and sent as its own `sort` parameter.
pub const SORT_KEY: &str = "sort";
/// Filter key pulled out of `q` and sent as its own `order` parameter.
pub const ORDER_KEY: &str = "order";

/// Insertion-ordered `key → value` mapping with unique keys.
///
/// Inserting an existing key replaces its value and keeps its original
/// position (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    entries: Vec<(String, String)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `sort` filter, if present.
    pub fn sort(&self) -> Option<&str> {
        self.get(SORT_KEY)
    }

    /// The `order` filter, if present.
    pub fn order(&self) -> Option<&str> {
        self.get(ORDER_KEY)
    }

    /// Free-form search qualifiers: every filter except `sort` and `order`.
    pub fn qualifiers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter(|(k, _)| *k != SORT_KEY && *k != ORDER_KEY)
    }
}

impl Serialize for Filters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A parsed user query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// Query text with all captured filter tokens removed, trimmed.
    pub text: String,
    /// Captured filters in order of first appearance.
    pub filters: Filters,
}

/// The request handed to a [`SearchGateway`](crate::gateway::SearchGateway).
///
/// `q` carries the free text followed by the qualifiers rendered as
/// `key:value`; `sort` and `order` travel as separate parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

impl SearchQuery {
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest::from(self)
    }
}

impl From<&SearchQuery> for SearchRequest {
    fn from(query: &SearchQuery) -> Self {
        let qualifiers: Vec<String> = query
            .filters
            .qualifiers()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect();
        let q = format!("{} {}", query.text, qualifiers.join(" "))
            .trim()
            .to_string();

        Self {
            q,
            sort: query.filters.sort().map(str::to_string),
            order: query.filters.order().map(str::to_string),
        }
    }
}

/// Split a raw query into free text and filters.
///
/// Never fails. An empty string yields empty text and no filters.
pub fn parse_query(raw: &str) -> SearchQuery {
    let Some(pattern) = FILTER_TOKEN.as_ref() else {
        return SearchQuery {
            text: raw.trim().to_string(),
            filters: Filters::new(),
        };
    };

    let mut filters = Filters::new();
    let mut text = String::with_capacity(raw.len());
    let mut last_end = 0;

    for caps in pattern.captures_iter(raw) {
        let (Some(whole), Some(key), Some(value)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if key.as_str().is_empty() || value.as_str().is_empty() {
            continue;
        }
        filters.insert(key.as_str(), value.as_str());
        text.push_str(&raw[last_end..whole.start()]);
        last_end = whole.end();
    }
    text.push_str(&raw[last_end..]);

    SearchQuery {
        text: text.trim().to_string(),
        filters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(query: &SearchQuery) -> Vec<(&str, &str)> {
        query.filters.iter().collect()
    }

    #[test]
    fn test_spacing_variants() {
        for raw in [
            "keyword: value",
            "keyword:value",
            "keyword :value",
            "keyword : value",
        ] {
            let query = parse_query(raw);
            assert_eq!(pairs(&query), vec![("keyword", "value")], "input: {:?}", raw);
            assert_eq!(query.text, "", "input: {:?}", raw);
        }
    }

    #[test]
    fn test_multiple_filters() {
        let query = parse_query("keyword1:value1 keyword2:value2");
        assert_eq!(
            pairs(&query),
            vec![("keyword1", "value1"), ("keyword2", "value2")]
        );
        assert!(query.text.is_empty());
    }

    #[test]
    fn test_text_before_filter() {
        let query = parse_query("text keyword:value");
        assert_eq!(query.text, "text");
        assert_eq!(query.filters.get("keyword"), Some("value"));
    }

    #[test]
    fn test_inner_spaces_not_collapsed() {
        let query = parse_query("text1 keyword:value text2");
        assert_eq!(query.text, "text1  text2");
    }

    #[test]
    fn test_empty_input() {
        let query = parse_query("");
        assert!(query.text.is_empty());
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_plain_text_only() {
        let query = parse_query("  python baby  ");
        assert_eq!(query.text, "python baby");
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_empty_value_stays_in_text() {
        let query = parse_query("rust keyword:");
        assert!(query.filters.is_empty());
        assert_eq!(query.text, "rust keyword:");
    }

    #[test]
    fn test_empty_key_stays_in_text() {
        let query = parse_query(":value rust");
        assert!(query.filters.is_empty());
        assert_eq!(query.text, ":value rust");
    }

    #[test]
    fn test_repeated_key_last_write_wins() {
        let query = parse_query("language:Rust sort:stars language:Go");
        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.filters.get("language"), Some("Go"));
        // first position is kept
        assert_eq!(
            pairs(&query),
            vec![("language", "Go"), ("sort", "stars")]
        );
    }

    #[test]
    fn test_greedy_key_with_inner_colon() {
        let query = parse_query("a:b:c");
        assert_eq!(pairs(&query), vec![("a:b", "c")]);
    }

    #[test]
    fn test_range_qualifiers() {
        let query = parse_query("language:Rust stars:1000..2000 forks:<=100 order:desc sort:forks");
        assert_eq!(query.filters.get("stars"), Some("1000..2000"));
        assert_eq!(query.filters.get("forks"), Some("<=100"));
        assert_eq!(query.filters.sort(), Some("forks"));
        assert_eq!(query.filters.order(), Some("desc"));
        assert!(query.text.is_empty());
    }

    #[test]
    fn test_text_never_contains_captured_tokens() {
        let inputs = [
            "anime sort:stars order:desc language:Python",
            "fast in:description",
            "popular in:description order:asc sort:stars",
            "get_anime_bot user:Desiders",
            "x  a : b   c:d e",
        ];
        for raw in inputs {
            let query = parse_query(raw);
            for (key, value) in query.filters.iter() {
                let token = format!("{}:{}", key, value);
                assert!(
                    !query.text.contains(&token),
                    "{:?} still contains {:?}",
                    query.text,
                    token
                );
            }
        }
    }

    #[test]
    fn test_request_splits_sort_and_order() {
        let query = parse_query("anime sort:stars order:desc language:Python");
        let request = query.to_request();
        assert_eq!(request.q, "anime language:Python");
        assert_eq!(request.sort.as_deref(), Some("stars"));
        assert_eq!(request.order.as_deref(), Some("desc"));
    }

    #[test]
    fn test_request_without_text() {
        let request = parse_query("language:Rust").to_request();
        assert_eq!(request.q, "language:Rust");
        assert!(request.sort.is_none());
        assert!(request.order.is_none());
    }

    #[test]
    fn test_request_text_only() {
        let request = parse_query("python baby").to_request();
        assert_eq!(request.q, "python baby");
    }

    #[test]
    fn test_filters_serialize_as_ordered_object() {
        let query = parse_query("sort:stars language:Rust");
        let json = serde_json::to_string(&query.filters).unwrap();
        assert_eq!(json, r#"{"sort":"stars","language":"Rust"}"#);
    }

    #[test]
    fn test_filters_insert_returns_previous() {
        let mut filters = Filters::new();
        assert_eq!(filters.insert("sort", "stars"), None);
        assert_eq!(filters.insert("sort", "forks"), Some("stars".to_string()));
        assert_eq!(filters.sort(), Some("forks"));
    }
}
