//! FileSystem trait definition

use crate::entry::Entry;
use anyhow::Result;
use std::path::Path;

/// Read-only view of a directory tree, used by the visitor as its only source of entries
pub trait FileSystem: Send + Sync {
    /// Check if a folder exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Return every file and folder under `path`, recursively, excluding `path` itself.
    ///
    /// The call is all-or-nothing: an unreadable directory fails the whole scan.
    fn scan(&self, path: &Path) -> Result<Vec<Entry>>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn scan(&self, path: &Path) -> Result<Vec<Entry>> {
        (**self).scan(path)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Box<T> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn scan(&self, path: &Path) -> Result<Vec<Entry>> {
        (**self).scan(path)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for std::sync::Arc<T> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn scan(&self, path: &Path) -> Result<Vec<Entry>> {
        (**self).scan(path)
    }
}
