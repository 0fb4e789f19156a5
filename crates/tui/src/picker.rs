//! File picker overlay backing the Load File action.

use linesift_core::path_utils::{self, DirEntryInfo};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerItem {
    Parent,
    Entry(DirEntryInfo),
}

impl PickerItem {
    pub fn label(&self) -> String {
        match self {
            PickerItem::Parent => "../".to_string(),
            PickerItem::Entry(e) if e.is_dir => format!("{}/", e.name),
            PickerItem::Entry(e) => e.name.clone(),
        }
    }

    pub fn is_dir(&self) -> bool {
        match self {
            PickerItem::Parent => true,
            PickerItem::Entry(e) => e.is_dir,
        }
    }
}

pub struct FilePicker {
    pub dir: PathBuf,
    pub items: Vec<PickerItem>,
    pub selected: usize,
    pub show_hidden: bool,
    /// Set when the current directory could not be listed.
    pub error: Option<String>,
}

impl FilePicker {
    pub fn open(dir: PathBuf, show_hidden: bool) -> Self {
        let mut picker = Self {
            dir,
            items: Vec::new(),
            selected: 0,
            show_hidden,
            error: None,
        };
        picker.refresh();
        picker
    }

    pub fn refresh(&mut self) {
        self.items.clear();
        self.selected = 0;
        self.error = None;

        if self.dir.parent().is_some() {
            self.items.push(PickerItem::Parent);
        }

        match path_utils::list_dir(&self.dir, self.show_hidden) {
            Ok(entries) => self.items.extend(entries.into_iter().map(PickerItem::Entry)),
            Err(e) => self.error = Some(format!("Cannot read {}: {}", self.dir.display(), e)),
        }
    }

    pub fn selected_item(&self) -> Option<&PickerItem> {
        self.items.get(self.selected)
    }

    pub fn next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn page_down(&mut self, page: usize) {
        for _ in 0..page.max(1) {
            self.next();
        }
    }

    pub fn page_up(&mut self, page: usize) {
        self.selected = self.selected.saturating_sub(page.max(1));
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn parent(&mut self) {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return;
        };
        let previous = std::mem::replace(&mut self.dir, parent);
        self.refresh();
        // keep the directory we came from under the cursor
        if let Some(idx) = self
            .items
            .iter()
            .position(|item| matches!(item, PickerItem::Entry(e) if e.path == previous))
        {
            self.selected = idx;
        }
    }

    /// Opens the selected directory, or returns the selected file.
    pub fn activate(&mut self) -> Option<PathBuf> {
        match self.selected_item().cloned()? {
            PickerItem::Parent => {
                self.parent();
                None
            }
            PickerItem::Entry(e) if e.is_dir => {
                self.enter(e.path);
                None
            }
            PickerItem::Entry(e) => Some(e.path),
        }
    }

    fn enter(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.refresh();
    }
}

/// First existing directory among the configured start, the loaded file's folder, and the cwd.
pub fn start_dir(configured: Option<PathBuf>, loaded: Option<&Path>) -> PathBuf {
    configured
        .filter(|p| p.is_dir())
        .or_else(|| loaded.and_then(Path::parent).filter(|p| p.is_dir()).map(Path::to_path_buf))
        .unwrap_or_else(|| path_utils::ensure_absolute("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("logs")).unwrap();
        fs::write(dir.path().join("logs").join("app.log"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "y").unwrap();
        dir
    }

    #[test]
    fn lists_parent_then_dirs_then_files() {
        let dir = sample_dir();
        let picker = FilePicker::open(dir.path().to_path_buf(), false);
        let labels: Vec<_> = picker.items.iter().map(PickerItem::label).collect();
        assert_eq!(labels, ["../", "logs/", "notes.txt"]);
        assert!(picker.error.is_none());
    }

    #[test]
    fn activate_descends_and_returns_files() {
        let dir = sample_dir();
        let mut picker = FilePicker::open(dir.path().to_path_buf(), false);

        picker.next(); // logs/
        assert_eq!(picker.activate(), None);
        assert_eq!(picker.dir, dir.path().join("logs"));

        picker.next(); // app.log
        assert_eq!(picker.activate(), Some(dir.path().join("logs").join("app.log")));
    }

    #[test]
    fn parent_reselects_previous_directory() {
        let dir = sample_dir();
        let mut picker = FilePicker::open(dir.path().join("logs"), false);
        picker.parent();
        assert_eq!(picker.dir, dir.path());
        assert_eq!(picker.selected_item().map(PickerItem::label), Some("logs/".to_string()));
    }

    #[test]
    fn unreadable_dir_sets_error() {
        let picker = FilePicker::open(PathBuf::from("/nonexistent/linesift"), false);
        assert!(picker.error.is_some());
        assert_eq!(picker.items.len(), 1); // only ../
    }

    #[test]
    fn selection_stays_in_bounds() {
        let dir = sample_dir();
        let mut picker = FilePicker::open(dir.path().to_path_buf(), false);
        picker.page_down(10);
        assert_eq!(picker.selected, 2);
        picker.next();
        assert_eq!(picker.selected, 2);
        picker.page_up(10);
        assert_eq!(picker.selected, 0);
        picker.last();
        assert_eq!(picker.selected, 2);
    }

    #[test]
    fn start_dir_falls_back_to_loaded_file() {
        let dir = sample_dir();
        let file = dir.path().join("notes.txt");
        assert_eq!(start_dir(None, Some(file.as_path())), dir.path());
        assert_eq!(
            start_dir(Some(PathBuf::from("/nonexistent")), Some(file.as_path())),
            dir.path()
        );
    }
}
