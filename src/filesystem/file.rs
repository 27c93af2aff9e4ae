// src/filesystem/file.rs
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    pub is_hidden: bool,
    pub extension: Option<String>,
}

impl FileEntry {
    pub fn from_path(path: &Path) -> Option<Self> {
        let metadata = std::fs::metadata(path).ok()?;
        let name = path.file_name()?.to_string_lossy().to_string();
        let is_dir = metadata.is_dir();
        let size = metadata.len();
        let modified = metadata.modified().ok().map(DateTime::<Utc>::from);
        let is_hidden = name.starts_with('.');
        let extension = path.extension().map(|e| e.to_string_lossy().to_lowercase());

        Some(FileEntry { name, path: path.to_path_buf(), is_dir, size, modified, is_hidden, extension })
    }

    pub fn is_pdf(&self) -> bool {
        !self.is_dir && self.extension.as_deref() == Some("pdf")
    }

    /// One-line listing: name, size and local modification time.
    pub fn describe(&self) -> String {
        if self.is_dir {
            return format!("{}/", self.name);
        }
        let modified = self
            .modified
            .map(|m| m.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        format!("{:<40} {:>9}  {}", self.name, human_size(self.size), modified)
    }
}

pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("Scan.PDF");
        std::fs::write(&pdf, vec![0u8; 2048]).unwrap();

        let entry = FileEntry::from_path(&pdf).unwrap();
        assert!(entry.is_pdf());
        assert_eq!(entry.size, 2048);
        assert!(entry.modified.is_some());

        let dir_entry = FileEntry::from_path(dir.path()).unwrap();
        assert!(dir_entry.is_dir);
        assert!(!dir_entry.is_pdf());
        assert!(dir_entry.describe().ends_with('/'));
    }

    #[test]
    fn test_missing_path() {
        assert!(FileEntry::from_path(Path::new("/definitely/not/here.pdf")).is_none());
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }
}
