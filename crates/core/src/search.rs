//! Case-insensitive substring filtering over loaded lines.

use crate::error::{InvalidQuery, SiftError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trimmed, non-empty query. Matching compares lowercase forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchQuery {
    text: String,
    #[serde(skip)]
    folded: String,
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Result<Self, SiftError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(InvalidQuery::EmptyQuery.into());
        }
        Ok(Self {
            text: text.to_string(),
            folded: text.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn matches(&self, line: &str) -> bool {
        line.to_lowercase().contains(&self.folded)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedLine {
    /// 1-based position in the scanned lines.
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredResult {
    pub query: SearchQuery,
    pub matches: Vec<MatchedLine>,
}

impl FilteredResult {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|m| m.text.as_str())
    }
}

/// Where `search` takes its lines from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    /// The lines captured by the last successful load.
    #[default]
    Memory,
    /// A fresh read of the loaded path on every search.
    Disk,
}

impl fmt::Display for SearchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchSource::Memory => f.write_str("memory"),
            SearchSource::Disk => f.write_str("disk"),
        }
    }
}

/// Single linear scan keeping every matching line, in order.
pub fn filter_lines<'a, I>(query: &SearchQuery, lines: I) -> Vec<MatchedLine>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .enumerate()
        .filter(|(_, line)| query.matches(line))
        .map(|(idx, line)| MatchedLine {
            number: idx + 1,
            text: line.to_string(),
        })
        .collect()
}
