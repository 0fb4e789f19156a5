//! linesift core
//!
//! The File/Search Service and everything it needs:
//! - document: the loaded file, read fully into lines
//! - search: query parsing and the case-insensitive line filter
//! - session: the replace-on-load state held by the service
//! - service: `load` / `search` request handlers
//! - config, path_utils: ambient settings and path helpers

pub mod config;
pub mod document;
pub mod error;
pub mod path_utils;
pub mod search;
pub mod service;
pub mod session;

pub use document::LoadedDocument;
pub use error::{InvalidQuery, SiftError};
pub use search::{FilteredResult, MatchedLine, SearchQuery, SearchSource};
pub use service::SearchService;
pub use session::Session;

use tracing::info;

pub fn init() {
    info!("linesift core initialized");
}
