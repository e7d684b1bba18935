//! Backend query builders.
//!
//! Turns the user's search string into the boolean query sent to the
//! search backend, and builds the request bodies for both backend calls.

use crate::query::pattern::{has_wildcard, split_terms};
use serde_json::{json, Map, Value};

/// Prefix that switches off automatic wildcard injection.
pub const LITERAL_MARKER: char = '\'';

/// One `must` clause of a [`StructuredQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryClause {
    /// Exact term equality
    Exact(String),
    /// `*`/`?` pattern match
    Wildcard(String),
}

impl QueryClause {
    /// Choose the clause kind from the presence of wildcard markers.
    pub fn for_term(term: &str) -> Self {
        if has_wildcard(term) {
            QueryClause::Wildcard(term.to_string())
        } else {
            QueryClause::Exact(term.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            QueryClause::Exact(value) | QueryClause::Wildcard(value) => value,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, QueryClause::Wildcard(_))
    }

    /// Backend form: `{"term": {field: value}}` or `{"wildcard": {field: value}}`.
    pub fn to_json(&self, field: &str) -> Value {
        let kind = match self {
            QueryClause::Exact(_) => "term",
            QueryClause::Wildcard(_) => "wildcard",
        };
        let mut inner = Map::new();
        inner.insert(field.to_string(), Value::String(self.value().to_string()));
        let mut outer = Map::new();
        outer.insert(kind.to_string(), Value::Object(inner));
        Value::Object(outer)
    }
}

/// Conjunctive query: every clause in `must` has to match.
///
/// `must_not` and `should` exist in the backend query shape but are never
/// populated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredQuery {
    pub must: Vec<QueryClause>,
}

impl StructuredQuery {
    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
    }

    /// Backend `bool` query over `field`.
    pub fn to_json(&self, field: &str) -> Value {
        let must: Vec<Value> = self.must.iter().map(|clause| clause.to_json(field)).collect();
        json!({
            "bool": {
                "must": must,
                "must_not": [],
                "should": []
            }
        })
    }
}

/// Normalize raw user input into the corrected search string.
///
/// Input starting with `'` is taken literally: the leading marker and a
/// trailing `'` are removed and nothing else changes. Any other input is
/// split on `,` and every trimmed piece gets a `*` prefix, so `Foo` also
/// finds `java.util.Foo`.
pub fn correct_search_string(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix(LITERAL_MARKER) {
        return rest.strip_suffix(LITERAL_MARKER).unwrap_or(rest).to_string();
    }
    raw.split(',')
        .map(|entry| format!("*{}", entry.trim()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the backend query from a corrected search string.
///
/// One clause per non-empty comma-separated term.
pub fn build_query(corrected: &str) -> StructuredQuery {
    StructuredQuery {
        must: split_terms(corrected).map(QueryClause::for_term).collect(),
    }
}

/// Body of the main search request, ordered by score descending.
pub fn search_request_body(query: &StructuredQuery, field: &str) -> Value {
    json!({
        "query": query.to_json(field),
        "sort": [
            { "score": { "order": "desc" } }
        ]
    })
}

/// Body of the single-file lookup: exact match on the file-name field.
pub fn file_lookup_body(field: &str, path: &str) -> Value {
    let mut term = Map::new();
    term.insert(field.to_string(), Value::String(path.to_string()));
    json!({
        "query": {
            "term": Value::Object(term)
        }
    })
}
