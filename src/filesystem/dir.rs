// src/filesystem/dir.rs
//! Directory listing for choosing a PDF to upload: directories and `.pdf`
//! files only, directories first.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, SortBy};

pub struct DirNavigator {
    pub current_path: PathBuf,
    pub entries: Vec<FileEntry>,
    pub show_hidden: bool,
    pub sort_by: SortBy,
    pub filter: Option<String>,
    selected: usize,
}

/// Result of activating the selected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    EnteredDir,
    PickedFile(PathBuf),
    Nothing,
}

impl DirNavigator {
    pub fn new(path: PathBuf) -> Self {
        let mut nav = DirNavigator {
            current_path: path,
            entries: Vec::new(),
            show_hidden: false,
            sort_by: SortBy::Name,
            filter: None,
            selected: 0,
        };
        nav.refresh();
        nav
    }

    pub fn refresh(&mut self) {
        self.entries.clear();
        let path = &self.current_path;

        for entry in WalkDir::new(path).max_depth(1).into_iter().flatten() {
            let entry_path = entry.path();
            if entry_path == path {
                continue;
            }

            if let Some(file_entry) = FileEntry::from_path(entry_path) {
                if !file_entry.is_dir && !file_entry.is_pdf() {
                    continue;
                }
                if !self.show_hidden && file_entry.is_hidden {
                    continue;
                }
                if let Some(ref filter) = self.filter {
                    if !file_entry.name.to_lowercase().contains(&filter.to_lowercase()) {
                        continue;
                    }
                }
                self.entries.push(file_entry);
            }
        }

        tracing::debug!(dir = %self.current_path.display(), entries = self.entries.len(), "listed directory");
        self.sort();
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }

    pub fn sort(&mut self) {
        let sort_by = self.sort_by;
        self.entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => match sort_by {
                SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortBy::Size => b.size.cmp(&a.size),
                SortBy::Modified => b.modified.cmp(&a.modified),
            },
        });
    }

    pub fn cycle_sort(&mut self) {
        self.sort_by = match self.sort_by {
            SortBy::Name => SortBy::Modified,
            SortBy::Modified => SortBy::Size,
            SortBy::Size => SortBy::Name,
        };
        self.sort();
    }

    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.refresh();
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&FileEntry> {
        self.entries.get(self.selected)
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.entries.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.entries.len() as i64 - 1;
        self.selected = (self.selected as i64 + delta as i64).clamp(0, last) as usize;
    }

    /// Enters the selected directory, or picks the selected PDF.
    pub fn activate(&mut self) -> Activation {
        let Some(entry) = self.selected().cloned() else {
            return Activation::Nothing;
        };
        if entry.is_dir {
            self.navigate_to(&entry.path);
            Activation::EnteredDir
        } else {
            Activation::PickedFile(entry.path)
        }
    }

    pub fn navigate_to(&mut self, path: &Path) {
        if path.is_dir() {
            self.current_path = path.to_path_buf();
            self.selected = 0;
            self.refresh();
        }
    }

    pub fn navigate_up(&mut self) {
        if let Some(parent) = self.current_path.parent().map(Path::to_path_buf) {
            let previous = self.current_path.clone();
            self.current_path = parent;
            self.selected = 0;
            self.refresh();
            if let Some(idx) = self.entries.iter().position(|e| e.path == previous) {
                self.selected = idx;
            }
        }
    }

    pub fn search(&mut self, query: &str) {
        self.filter = if query.trim().is_empty() { None } else { Some(query.to_string()) };
        self.selected = 0;
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("reports")).unwrap();
        std::fs::create_dir(dir.path().join(".cache")).unwrap();
        std::fs::write(dir.path().join("b_labs.pdf"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("a_discharge.pdf"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("reports").join("xray.pdf"), b"%PDF").unwrap();
        dir
    }

    fn names(nav: &DirNavigator) -> Vec<&str> {
        nav.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_lists_dirs_first_then_pdfs() {
        let dir = fixture();
        let nav = DirNavigator::new(dir.path().to_path_buf());
        assert_eq!(names(&nav), vec!["reports", "a_discharge.pdf", "b_labs.pdf"]);
    }

    #[test]
    fn test_hidden_toggle() {
        let dir = fixture();
        let mut nav = DirNavigator::new(dir.path().to_path_buf());
        nav.toggle_hidden();
        assert_eq!(names(&nav)[0], ".cache");
    }

    #[test]
    fn test_activate_and_navigate_up() {
        let dir = fixture();
        let mut nav = DirNavigator::new(dir.path().to_path_buf());

        assert_eq!(nav.activate(), Activation::EnteredDir);
        assert_eq!(names(&nav), vec!["xray.pdf"]);
        assert_eq!(nav.activate(), Activation::PickedFile(dir.path().join("reports").join("xray.pdf")));

        nav.navigate_up();
        assert_eq!(nav.current_path, dir.path());
        assert_eq!(nav.selected().unwrap().name, "reports");
    }

    #[test]
    fn test_selection_is_clamped() {
        let dir = fixture();
        let mut nav = DirNavigator::new(dir.path().to_path_buf());
        nav.move_selection(10);
        assert_eq!(nav.selected_index(), 2);
        nav.move_selection(-10);
        assert_eq!(nav.selected_index(), 0);
    }

    #[test]
    fn test_search_filter() {
        let dir = fixture();
        let mut nav = DirNavigator::new(dir.path().to_path_buf());
        nav.search("LABS");
        assert_eq!(names(&nav), vec!["b_labs.pdf"]);
        nav.search("");
        assert_eq!(nav.entries.len(), 3);
    }
}
