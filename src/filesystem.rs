//! File-system access used by the tree loader and solution
//!
//! The loader never touches `std::fs` directly. It goes through the
//! [`FileSystemAccess`] trait, which has two implementations:
//!
//! - [`DiskFS`]: the real file system.
//! - [`MemoryFS`]: an in-memory file system for tests and dry runs.

use crate::error::{Error, Result};
use crate::path::normalize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Operations the core needs from a file system.
pub trait FileSystemAccess {
    /// Resolve a path to an absolute, normalized path.
    fn full_path(&self, path: &Path) -> Result<PathBuf>;

    /// Check whether a file exists at `path`.
    fn is_file(&self, path: &Path) -> bool;

    /// Check whether a directory exists at `path`.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace a whole file with `content`.
    fn write_string(&mut self, path: &Path, content: &str) -> Result<()>;

    /// Recursively list every file named `file_name` under `base`, sorted.
    fn find_files(&self, base: &Path, file_name: &str) -> Result<Vec<PathBuf>>;

    /// Directory containing `path`.
    fn parent_dir(&self, path: &Path) -> PathBuf {
        path.parent().map(Path::to_path_buf).unwrap_or_default()
    }

    /// Join a relative segment onto a base path, normalizing `.` and `..`.
    fn join(&self, base: &Path, segment: &str) -> PathBuf {
        normalize(&base.join(segment))
    }
}

/// The real file system
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFS;

impl DiskFS {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystemAccess for DiskFS {
    fn full_path(&self, path: &Path) -> Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(normalize(&absolute))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_string(&mut self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })
    }

    fn find_files(&self, base: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for entry in WalkDir::new(base).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && entry.file_name() == file_name {
                found.push(normalize(entry.path()));
            }
        }
        Ok(found)
    }
}

/// In-memory file system for tests and dry runs
///
/// Paths are stored normalized and are treated as absolute; relative paths
/// are resolved against `/`. Directories exist implicitly as prefixes of
/// stored files.
#[derive(Debug, Clone, Default)]
pub struct MemoryFS {
    /// Files stored as path -> content mapping
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFS {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    fn key(path: &Path) -> PathBuf {
        normalize(&Path::new("/").join(path))
    }

    /// Add or replace a file with string content
    pub fn add_file_string<P: AsRef<Path>>(&mut self, path: P, content: &str) {
        self.files
            .insert(Self::key(path.as_ref()), content.to_string());
    }

    /// Get a file's content by path
    pub fn get_file<P: AsRef<Path>>(&self, path: P) -> Option<&str> {
        self.files
            .get(&Self::key(path.as_ref()))
            .map(String::as_str)
    }

    /// List all files
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.files.keys().cloned().collect()
    }

    /// Get the number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if filesystem is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileSystemAccess for MemoryFS {
    fn full_path(&self, path: &Path) -> Result<PathBuf> {
        Ok(Self::key(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(&Self::key(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let dir = Self::key(path);
        self.files
            .keys()
            .any(|file| file != &dir && file.starts_with(&dir))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.get_file(path)
            .map(str::to_string)
            .ok_or_else(|| Error::FileAccess {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            })
    }

    fn write_string(&mut self, path: &Path, content: &str) -> Result<()> {
        self.add_file_string(path, content);
        Ok(())
    }

    fn find_files(&self, base: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
        let base = Self::key(base);
        Ok(self
            .files
            .keys()
            .filter(|file| file.starts_with(&base))
            .filter(|file| file.file_name().is_some_and(|name| name == file_name))
            .cloned()
            .collect())
    }
}
