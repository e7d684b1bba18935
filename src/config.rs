//! Console configuration.
//!
//! Backend address, page size and the index/field names are an explicit
//! [`Config`] value handed to [`crate::console::SearchConsole`]. Values are
//! layered: defaults, then an optional TOML file, then environment, then
//! command-line flags.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding [`Config::backend_url`].
pub const ENV_URL: &str = "SYMSCOUT_URL";
/// Environment variable overriding [`Config::result_size`].
pub const ENV_SIZE: &str = "SYMSCOUT_SIZE";

const DEFAULT_URL: &str = "http://localhost:9200";
const DEFAULT_RESULT_SIZE: usize = 50;

/// Settings for one search console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend address, with or without scheme
    pub backend_url: String,
    /// Maximum number of hits requested per search
    pub result_size: usize,
    /// Index holding per-file token documents
    pub source_index: String,
    /// Index holding full file contents
    pub file_index: String,
    /// Field queried with the search terms
    pub import_field: String,
    /// Field matched exactly by the single-file lookup
    pub file_field: String,
    /// Request timeout; no timeout when unset
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_URL.to_string(),
            result_size: DEFAULT_RESULT_SIZE,
            source_index: "betterdocs".to_string(),
            file_index: "sourcefile".to_string(),
            import_field: "custom.tokens.importName".to_string(),
            file_field: "typesourcefile.fileName".to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, SearchError> {
        if !path.is_file() {
            return Err(SearchError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Apply `SYMSCOUT_URL` / `SYMSCOUT_SIZE` from the process environment.
    pub fn apply_env(&mut self) -> Result<(), SearchError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides using the given lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), SearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL) {
            self.backend_url = url.trim().to_string();
        }
        if let Some(size) = lookup(ENV_SIZE) {
            self.result_size = size.trim().parse().map_err(|_| SearchError::InvalidConfig {
                reason: format!("{} must be a positive integer, got '{}'", ENV_SIZE, size),
            })?;
        }
        Ok(())
    }

    /// Replace the backend address and page size.
    pub fn update(&mut self, url: &str, size: usize) {
        self.backend_url = url.trim().to_string();
        self.result_size = size;
    }

    /// Reject settings no search could run with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.backend_url.trim().is_empty() {
            return Err(SearchError::InvalidConfig {
                reason: "backend_url is empty".to_string(),
            });
        }
        if self.result_size == 0 {
            return Err(SearchError::InvalidConfig {
                reason: "result_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Base URL of the backend, with a scheme and without a trailing slash.
    pub fn endpoint(&self) -> String {
        let url = self.backend_url.trim().trim_end_matches('/');
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("http://{}", url)
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
