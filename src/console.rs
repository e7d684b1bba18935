//! Search console: runs the whole pipeline for one search.
//!
//! raw input → corrected string → backend query → hits → ranked file
//! matches → tree view and top-file code view.

use crate::aggregate::{aggregate_hits, FileMatch};
use crate::backend::SearchBackend;
use crate::config::Config;
use crate::error::SearchError;
use crate::query::{
    build_query, correct_search_string, file_lookup_body, search_request_body, StructuredQuery,
};
use crate::view::{build_tree, FileView, RepoGroup};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

/// A search translated for the backend, before anything is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSearch {
    pub raw: String,
    pub corrected: String,
    pub query: StructuredQuery,
    pub body: Value,
}

impl PreparedSearch {
    /// Translate raw input using the field names from `config`.
    pub fn new(raw: &str, config: &Config) -> Self {
        let corrected = correct_search_string(raw);
        let query = build_query(&corrected);
        let body = search_request_body(&query, &config.import_field);
        Self {
            raw: raw.to_string(),
            corrected,
            query,
            body,
        }
    }
}

/// Wall-clock time spent per stage, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Timings {
    pub backend_ms: u64,
    pub aggregation_ms: u64,
    pub lookup_ms: u64,
}

/// Everything one search produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub corrected: String,
    pub total_hits: u64,
    pub files: Vec<FileMatch>,
    pub tree: Vec<RepoGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<FileView>,
    #[serde(skip)]
    pub timings: Timings,
}

/// Pipeline entry point bound to one configuration and backend.
#[derive(Debug)]
pub struct SearchConsole<B> {
    config: Config,
    backend: B,
}

impl<B: SearchBackend> SearchConsole<B> {
    pub fn new(config: Config, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Translate raw input into the backend request.
    pub fn prepare(&self, raw: &str) -> PreparedSearch {
        PreparedSearch::new(raw, &self.config)
    }

    /// Run a search and, when `with_view` is set, open the top-ranked file.
    ///
    /// A backend failure is returned before any aggregation happens.
    pub fn search(&self, raw: &str, with_view: bool) -> Result<SearchOutcome, SearchError> {
        let prepared = self.prepare(raw);
        tracing::info!(
            query = %prepared.raw,
            corrected = %prepared.corrected,
            clauses = prepared.query.must.len(),
            "running search"
        );

        let backend_start = Instant::now();
        let hits = self.backend.search(
            &self.config.source_index,
            &prepared.body,
            self.config.result_size,
        )?;
        let backend_ms = backend_start.elapsed().as_millis() as u64;

        let aggregation_start = Instant::now();
        let files = aggregate_hits(&prepared.corrected, &hits);
        let tree = build_tree(&files);
        let aggregation_ms = aggregation_start.elapsed().as_millis() as u64;

        let lookup_start = Instant::now();
        let view = if with_view {
            self.open_top_file(&files)?
        } else {
            None
        };
        let lookup_ms = lookup_start.elapsed().as_millis() as u64;

        Ok(SearchOutcome {
            query: prepared.raw,
            corrected: prepared.corrected,
            total_hits: hits.len() as u64,
            files,
            tree,
            view,
            timings: Timings {
                backend_ms,
                aggregation_ms,
                lookup_ms,
            },
        })
    }

    /// Fetch the content of the top-ranked file only.
    ///
    /// Returns `None` when there are no matches or the lookup finds no
    /// document for the path.
    pub fn open_top_file(&self, files: &[FileMatch]) -> Result<Option<FileView>, SearchError> {
        let Some(top) = files.first() else {
            return Ok(None);
        };
        let body = file_lookup_body(&self.config.file_field, &top.path);
        let hits = self.backend.search(&self.config.file_index, &body, 1)?;
        match hits.into_iter().next() {
            Some(hit) => {
                let content = hit.source.file_content.unwrap_or_default();
                Ok(Some(FileView::new(top, content)))
            }
            None => {
                tracing::warn!(path = %top.path, "no source document for top match");
                Ok(None)
            }
        }
    }
}
