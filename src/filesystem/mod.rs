// src/filesystem/mod.rs
pub mod dir;
pub mod file;

pub use dir::DirNavigator;
pub use file::FileEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Name,
    Size,
    Modified,
}
