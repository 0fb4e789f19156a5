//! Loaded Document
//! A file read fully into memory as an ordered list of lines.

use crate::error::SiftError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    path: PathBuf,
    lines: Vec<String>,
}

impl LoadedDocument {
    /// Reads `path` as UTF-8 and splits it into lines.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SiftError> {
        let path = path.as_ref().to_path_buf();
        match read_lines(&path) {
            Ok(lines) => Ok(Self { path, lines }),
            Err(source) => Err(SiftError::Load { path, source }),
        }
    }

    pub fn from_lines(path: impl Into<PathBuf>, lines: Vec<String>) -> Self {
        Self {
            path: path.into(),
            lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Reads a whole file and splits it into lines.
pub(crate) fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(split_lines(&content))
}

/// Splits on LF, CRLF or a lone CR.
/// A trailing line terminator does not produce an empty last line.
fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        let Some(idx) = rest.find(['\n', '\r']) else {
            lines.push(rest.to_owned());
            break;
        };
        lines.push(rest[..idx].to_owned());
        let terminator = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[idx + terminator..];
    }
    lines
}
