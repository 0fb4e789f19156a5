use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("Error loading file {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    InvalidQuery(#[from] InvalidQuery),
    #[error("Error reading file {}: {source}", .path.display())]
    Search {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a search request was rejected before scanning.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidQuery {
    #[error("Please load a file before searching.")]
    NoDocument,
    #[error("Please enter a search string.")]
    EmptyQuery,
}

impl SiftError {
    pub fn is_load(&self) -> bool {
        matches!(self, SiftError::Load { .. })
    }

    pub fn is_invalid_query(&self) -> bool {
        matches!(self, SiftError::InvalidQuery(_))
    }

    pub fn is_search(&self) -> bool {
        matches!(self, SiftError::Search { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn load_error_carries_path_and_io_message() {
        let err = SiftError::Load {
            path: PathBuf::from("/tmp/missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert!(err.is_load());
        assert_eq!(
            err.to_string(),
            "Error loading file /tmp/missing.txt: No such file or directory"
        );
    }

    #[test]
    fn invalid_query_reasons_are_human_readable() {
        let err: SiftError = InvalidQuery::EmptyQuery.into();
        assert!(err.is_invalid_query());
        assert_eq!(err.to_string(), "Please enter a search string.");
        assert_eq!(
            SiftError::from(InvalidQuery::NoDocument).to_string(),
            "Please load a file before searching."
        );
    }
}
