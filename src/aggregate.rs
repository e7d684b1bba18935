//! Reduce backend hits into ranked per-file matches.
//!
//! The backend query decides which documents come back; this module decides
//! which tokens inside each document actually matched the search terms.
//! A hit can carry many tokens of which only some match, so the search
//! string is applied a second time, client side, before line numbers are
//! collected.

use crate::backend::{RawHit, Token};
use crate::query::compile_terms;
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashMap};

/// Aggregated matches within one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMatch {
    pub match_id: String,
    pub path: String,
    /// `owner-repo` label for the tree view
    pub repo: String,
    /// Last path segment
    pub name: String,
    /// Matching line numbers, ascending, no duplicates
    pub lines: Vec<u32>,
}

/// Repository label and display name derived from a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLabels {
    pub repo: String,
    pub name: String,
}

/// Split `owner/repo/dir/File.java` into `owner-repo` and `File.java`.
///
/// Paths with fewer than two segments keep an empty second half, so
/// `Foo.java` yields the repo label `Foo.java-`.
pub fn split_file_path(path: &str) -> PathLabels {
    let segments: Vec<&str> = path.split('/').collect();
    let first = segments.first().copied().unwrap_or_default();
    let second = segments.get(1).copied().unwrap_or_default();
    let name = segments.last().copied().unwrap_or_default();
    PathLabels {
        repo: format!("{}-{}", first, second),
        name: name.to_string(),
    }
}

/// Tokens whose import name matches any term of the search string.
///
/// A token matching several terms is kept once.
pub fn filter_relevant_tokens<'a>(search: &str, tokens: &'a [Token]) -> Vec<&'a Token> {
    let patterns = compile_terms(search);
    tokens
        .iter()
        .filter(|token| token_matches(&patterns, token))
        .collect()
}

fn token_matches(patterns: &[Regex], token: &Token) -> bool {
    patterns.iter().any(|p| p.is_match(&token.import_name))
}

/// Stable identifier for a file match.
pub(crate) fn match_id(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"file:");
    hasher.update(path.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}

/// Group hits by file and rank the files by number of matching lines.
///
/// `search` is the corrected search string, the same one the backend query
/// was built from. Files are emitted in first-encounter order, then stably
/// sorted so the file with the most matching lines comes first. A file
/// whose tokens match nothing is still emitted, with empty `lines`.
pub fn aggregate_hits(search: &str, hits: &[RawHit]) -> Vec<FileMatch> {
    let patterns = compile_terms(search);

    let mut order: Vec<&str> = Vec::new();
    let mut lines_by_file: HashMap<&str, BTreeSet<u32>> = HashMap::new();
    for hit in hits {
        let path = hit.path();
        let lines = lines_by_file.entry(path).or_insert_with(|| {
            order.push(path);
            BTreeSet::new()
        });
        for token in hit.tokens().iter().filter(|t| token_matches(&patterns, t)) {
            lines.extend(token.line_numbers.iter().copied());
        }
    }

    let mut files: Vec<FileMatch> = order
        .into_iter()
        .map(|path| {
            let labels = split_file_path(path);
            let lines = lines_by_file
                .remove(path)
                .map(|set| set.into_iter().collect())
                .unwrap_or_default();
            FileMatch {
                match_id: match_id(path),
                path: path.to_string(),
                repo: labels.repo,
                name: labels.name,
                lines,
            }
        })
        .collect();

    // sort_by is stable: ties keep encounter order
    files.sort_by(|a, b| b.lines.len().cmp(&a.lines.len()));
    tracing::debug!(hits = hits.len(), files = files.len(), "aggregated hits");
    files
}
