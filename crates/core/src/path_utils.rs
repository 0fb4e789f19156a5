//! Path utilities for linesift
//!
//! Tilde expansion, the app root, and directory listings for the file picker.

use std::io;
use std::path::{Path, PathBuf};

/// Expands a leading tilde (~) to the user's home directory.
/// Examples:
/// "~/notes.txt" -> "/home/ana/notes.txt"
/// "/tmp/foo" -> "/tmp/foo" (no change)
pub fn expand_tilde(path: &str) -> String {
    if path != "~" && !path.starts_with("~/") {
        return path.to_string();
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    path.replacen('~', &home, 1)
}

/// Helper to convert a potentially tilde-containing string into a PathBuf.
pub fn get_path(path: &str) -> PathBuf {
    PathBuf::from(expand_tilde(path))
}

/// Resolves the linesift app root (log file, fallback `.env`) from LINESIFT_ROOT.
/// Handles absolute paths, tilde expansion, and relative names under $HOME.
pub fn get_app_root() -> PathBuf {
    let root_name = std::env::var("LINESIFT_ROOT").unwrap_or_else(|_| ".linesift".to_string());

    if root_name.starts_with('/') {
        PathBuf::from(root_name)
    } else if root_name.starts_with('~') {
        get_path(&root_name)
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(root_name)
    }
}

/// Ensures a path is absolute, resolving tilde and relative to the working directory.
pub fn ensure_absolute(path: &str) -> PathBuf {
    let p = get_path(path);
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&p))
            .unwrap_or(p)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Lists one directory level: directories first, then files, each by
/// case-insensitive name. Dot-entries are skipped unless `show_hidden`.
pub fn list_dir(path: &Path, show_hidden: bool) -> io::Result<Vec<DirEntryInfo>> {
    let mut entries = Vec::new();

    for entry in std::fs::read_dir(path)?.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if !show_hidden && name.starts_with('.') {
            continue;
        }

        // follow symlinks so linked directories can be entered
        let entry_path = entry.path();
        let is_dir = entry_path.is_dir();
        entries.push(DirEntryInfo {
            name,
            path: entry_path,
            is_dir,
        });
    }

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}
