//! Search-term splitting and shell-wildcard patterns.

use regex::{Regex, RegexBuilder};

pub(crate) const MAX_REGEX_SIZE: usize = 10_000; // 10KB limit to prevent memory exhaustion

/// Split a search string on `,` and trim each piece, dropping empty pieces.
pub fn split_terms(search: &str) -> impl Iterator<Item = &str> {
    search.split(',').map(str::trim).filter(|term| !term.is_empty())
}

/// True if the term carries a `*` or `?` wildcard marker.
pub fn has_wildcard(term: &str) -> bool {
    term.contains(['*', '?'])
}

/// Translate a shell-style wildcard term into regex source.
///
/// `*` becomes `.*` and `?` becomes `.`; every other character is matched
/// literally. The result is unanchored, so it tests for a substring match.
pub fn wildcard_to_regex(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 8);
    let mut literal = String::new();
    for ch in term.chars() {
        match ch {
            '*' | '?' => {
                pattern.push_str(&regex::escape(&literal));
                literal.clear();
                pattern.push_str(if ch == '*' { ".*" } else { "." });
            }
            _ => literal.push(ch),
        }
    }
    pattern.push_str(&regex::escape(&literal));
    pattern
}

/// Compile one term into a matcher. Returns `None` if the pattern is
/// rejected by the regex engine (for example because it is too large).
pub fn compile_term(term: &str) -> Option<Regex> {
    let source = wildcard_to_regex(term);
    match RegexBuilder::new(&source).size_limit(MAX_REGEX_SIZE * 100).build() {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::warn!(term, error = %err, "skipping search term that does not compile");
            None
        }
    }
}

/// Compile every non-empty term of a search string.
pub fn compile_terms(search: &str) -> Vec<Regex> {
    split_terms(search)
        .filter(|term| term.len() <= MAX_REGEX_SIZE)
        .filter_map(compile_term)
        .collect()
}
