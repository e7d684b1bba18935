//! symscout - import-symbol search over an Elasticsearch code index.
//!
//! A search string such as `List, Map*, ?ash` is translated into a boolean
//! backend query, the hits are grouped per file and ranked by the number of
//! matching lines, and the results are presented as a per-repository file
//! tree plus a code view of the top-ranked file.
//!
//! # Quick Start
//!
//! ```no_run
//! use symscout::{Config, HttpBackend, SearchConsole};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let backend = HttpBackend::new(&config)?;
//! let console = SearchConsole::new(config, backend);
//! let outcome = console.search("HashMap, List", true)?;
//! for file in &outcome.files {
//!     println!("{} {:?}", file.path, file.lines);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`query`] - Input correction and backend query building
//! - [`aggregate`] - Per-file grouping and ranking of hits
//! - [`view`] - Repository tree and code view models
//! - [`backend`] - Backend trait and HTTP implementation
//! - [`console`] - The end-to-end search pipeline
//! - [`config`] - Console configuration
//! - [`error`] - Error types
//! - [`output`] - Response types and formatting

pub mod aggregate;
pub mod backend;
pub mod config;
pub mod console;
pub mod error;
pub mod output;
pub mod output_common;
pub mod query;
pub mod view;

pub use aggregate::{aggregate_hits, filter_relevant_tokens, split_file_path, FileMatch};
pub use backend::{HttpBackend, RawHit, SearchBackend, Token};
pub use config::Config;
pub use console::{SearchConsole, SearchOutcome};
pub use error::SearchError;
pub use query::{build_query, correct_search_string, QueryClause, StructuredQuery};
pub use view::{build_tree, FileView, RepoGroup};
