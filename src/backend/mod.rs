//! Search backend abstraction.
//!
//! The console talks to its document-search backend through the
//! [`SearchBackend`] trait: one request, one list of hits. [`HttpBackend`]
//! speaks the Elasticsearch `_search` API; tests substitute in-memory
//! implementations.

mod http;
mod response;

pub use http::HttpBackend;
pub use response::{parse_hits, HitSource, RawHit, Token};

use crate::error::SearchError;
use serde_json::Value;

/// Backend trait for running one search request.
///
/// Implementations return hits in the order the backend ranked them. No
/// retry is expected; a failed request is reported to the caller as is.
pub trait SearchBackend {
    /// Run `body` against `index`, returning at most `size` hits.
    fn search(&self, index: &str, body: &Value, size: usize) -> Result<Vec<RawHit>, SearchError>;
}

impl<B: SearchBackend + ?Sized> SearchBackend for &B {
    fn search(&self, index: &str, body: &Value, size: usize) -> Result<Vec<RawHit>, SearchError> {
        (**self).search(index, body, size)
    }
}
