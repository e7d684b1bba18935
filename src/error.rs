//! Error types for symscout.
//!
//! Error codes are organized by category:
//!
//! - **SCT-E001 to SCT-E099**: Search backend errors
//! - **SCT-E100 to SCT-E199**: Query errors
//! - **SCT-E300 to SCT-E399**: Configuration errors
//! - **SCT-E900 to SCT-E999**: I/O, encoding and miscellaneous errors
//!
//! The query and aggregation pipeline itself never fails; every variant here
//! comes from the boundary (backend transport, configuration, files).

use thiserror::Error;

/// Main error type for symscout operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The search backend could not be reached.
    #[error("Search backend unavailable at {url}: {reason}")]
    BackendUnavailable { url: String, reason: String },

    /// The search backend answered with a non-success status.
    #[error("Search backend returned {status}: {body}")]
    BackendStatus { status: u16, body: String },

    /// The backend response did not have the expected hit shape.
    #[error("Invalid backend response: {reason}")]
    InvalidResponse { reason: String },

    /// Invalid command invocation or query input.
    #[error("Invalid query: {query}")]
    InvalidQuery { query: String },

    /// Configuration file not found at the given path.
    #[error("Config not found: {path}")]
    ConfigNotFound { path: String },

    /// Configuration value rejected.
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML configuration could not be parsed.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl SearchError {
    /// Returns the error code for this error.
    pub const fn error_code(&self) -> &'static str {
        match self {
            SearchError::BackendUnavailable { .. } => "SCT-E001",
            SearchError::BackendStatus { .. } => "SCT-E002",
            SearchError::InvalidResponse { .. } => "SCT-E003",
            SearchError::InvalidQuery { .. } => "SCT-E101",
            SearchError::ConfigNotFound { .. } => "SCT-E301",
            SearchError::InvalidConfig { .. } => "SCT-E302",
            SearchError::IoError(_) => "SCT-E901",
            SearchError::JsonError(_) => "SCT-E902",
            SearchError::TomlError(_) => "SCT-E903",
        }
    }

    /// Returns the severity level for this error.
    pub const fn severity(&self) -> &'static str {
        match self {
            SearchError::InvalidQuery { .. } => "warning",
            _ => "error",
        }
    }

    /// Returns remediation hints for this error, if available.
    pub const fn remediation(&self) -> Option<&'static str> {
        match self {
            SearchError::BackendUnavailable { .. } => {
                Some("Check that the search backend is running and --url points at it.")
            }
            SearchError::BackendStatus { .. } => {
                Some("Check that the configured index and field names exist on the backend.")
            }
            SearchError::InvalidResponse { .. } => {
                Some("The backend must answer with an Elasticsearch-style hits.hits array.")
            }
            SearchError::InvalidQuery { .. } => Some("Run with --help for usage information."),
            SearchError::ConfigNotFound { .. } => {
                Some("Ensure the --config path is correct and the file exists.")
            }
            SearchError::InvalidConfig { .. } => {
                Some("backend_url must be non-empty and result_size must be at least 1.")
            }
            SearchError::IoError(_) => Some("Check file permissions and paths."),
            SearchError::JsonError(_) => None,
            SearchError::TomlError(_) => Some("Check the config file for TOML syntax errors."),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        if let Some(status) = err.status() {
            return SearchError::BackendStatus {
                status: status.as_u16(),
                body: err.to_string(),
            };
        }
        if err.is_decode() {
            return SearchError::InvalidResponse {
                reason: err.to_string(),
            };
        }
        SearchError::BackendUnavailable {
            url,
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_category_prefixed() {
        let err = SearchError::BackendStatus {
            status: 404,
            body: "no such index".to_string(),
        };
        assert_eq!(err.error_code(), "SCT-E002");
        assert_eq!(err.severity(), "error");
        assert!(err.remediation().is_some());

        let err = SearchError::InvalidConfig {
            reason: "result_size must be at least 1".to_string(),
        };
        assert_eq!(err.error_code(), "SCT-E302");
        assert_eq!(err.to_string(), "Invalid config: result_size must be at least 1");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: SearchError = parse.unwrap_err().into();
        assert_eq!(err.error_code(), "SCT-E902");
        assert!(err.remediation().is_none());
    }
}
