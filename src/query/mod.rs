//! Query module: from raw search input to backend query.
//!
//! This module covers the first half of the search pipeline:
//!
//! - Correcting the raw input (literal marker, automatic `*` prefix)
//! - Building the conjunctive backend query, one clause per term
//! - Building the request bodies for the search and single-file lookup
//! - Converting shell-style wildcard terms into regex matchers, used again
//!   by [`crate::aggregate`] to decide which tokens in a hit matched

mod builder;
mod pattern;

pub use builder::{
    build_query, correct_search_string, file_lookup_body, search_request_body, QueryClause,
    StructuredQuery, LITERAL_MARKER,
};
pub use pattern::{compile_term, compile_terms, has_wildcard, split_terms, wildcard_to_regex};

#[cfg(test)]
mod tests;
