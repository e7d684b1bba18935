//! Backend response shapes.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One named symbol occurrence and the source lines it appears on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "importName")]
    pub import_name: String,
    #[serde(rename = "lineNumbers", default)]
    pub line_numbers: Vec<u32>,
}

/// Document body of a hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitSource {
    /// Repository-relative path, `owner/repo/...`
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub tokens: Vec<Token>,
    /// Full text; only present on single-file lookup hits
    #[serde(rename = "fileContent", default, skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,
}

/// One backend search result document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: HitSource,
}

impl RawHit {
    pub fn path(&self) -> &str {
        &self.source.file
    }

    pub fn tokens(&self) -> &[Token] {
        &self.source.tokens
    }
}

#[derive(Deserialize)]
struct SearchResponseBody {
    hits: HitsEnvelope,
}

#[derive(Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<RawHit>,
}

/// Extract the hit list from a backend response.
///
/// Accepts a full `_search` response (`{"hits": {"hits": [...]}}`) or a
/// bare array of hits, which is how saved responses are usually trimmed.
pub fn parse_hits(value: Value) -> Result<Vec<RawHit>, SearchError> {
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }
    if value.get("hits").is_none() {
        return Err(SearchError::InvalidResponse {
            reason: "missing 'hits' object".to_string(),
        });
    }
    let body: SearchResponseBody =
        serde_json::from_value(value).map_err(|e| SearchError::InvalidResponse {
            reason: e.to_string(),
        })?;
    Ok(body.hits.hits)
}
