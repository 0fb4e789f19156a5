//! File/Search Service
//! Request/response handlers behind the Load File and Search actions.

use crate::document::{self, LoadedDocument};
use crate::error::{InvalidQuery, SiftError};
use crate::search::{FilteredResult, SearchQuery, SearchSource, filter_lines};
use crate::session::Session;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct SearchService {
    source: SearchSource,
    session: Session,
}

impl SearchService {
    pub fn new(source: SearchSource) -> Self {
        Self {
            source,
            session: Session::new(),
        }
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        self.session.document()
    }

    pub fn filtered(&self) -> Option<&FilteredResult> {
        self.session.filtered()
    }

    /// Reads `path` and makes it the current document.
    /// On failure the session is left exactly as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&LoadedDocument, SiftError> {
        let path = path.as_ref();
        let document = match LoadedDocument::read(path) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("load failed: {}", e);
                return Err(e);
            }
        };
        info!("Loaded {} lines from {}", document.line_count(), path.display());
        Ok(self.session.replace_document(document))
    }

    /// Filters the current document by `raw_query`.
    /// Rejected or failed searches keep the previous filtered result.
    pub fn search(&mut self, raw_query: &str) -> Result<&FilteredResult, SiftError> {
        let document = self
            .session
            .document()
            .ok_or(SiftError::InvalidQuery(InvalidQuery::NoDocument))?;
        let query = SearchQuery::parse(raw_query)?;

        let matches = match self.source {
            SearchSource::Memory => {
                filter_lines(&query, document.lines().iter().map(String::as_str))
            }
            SearchSource::Disk => {
                let lines = document::read_lines(document.path()).map_err(|source| {
                    warn!("re-read of {} failed: {}", document.path().display(), source);
                    SiftError::Search {
                        path: document.path().to_path_buf(),
                        source,
                    }
                })?;
                filter_lines(&query, lines.iter().map(String::as_str))
            }
        };

        debug!(
            "query {:?} matched {} lines ({} source)",
            query.as_str(),
            matches.len(),
            self.source
        );
        Ok(self.session.set_filtered(FilteredResult { query, matches }))
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }
}
