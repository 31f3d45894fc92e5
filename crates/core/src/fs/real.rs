use super::FileSystem;
use crate::entry::Entry;
use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Directory reader backed by the local disk.
///
/// Scans list every folder first, then every file, each group in walk order.
/// Symbolic links are classified by their target but never descended into.
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn scan(&self, path: &Path) -> Result<Vec<Entry>> {
        let mut folders = Vec::new();
        let mut files = Vec::new();

        for entry in WalkDir::new(path)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.context(format!("Failed to scan directory {:?}", path))?;
            let entry_path = entry.path().to_string_lossy().to_string();

            // a link to a folder counts as a folder
            if entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir()) {
                folders.push(Entry::folder(entry_path));
            } else {
                files.push(Entry::file(entry_path));
            }
        }

        folders.extend(files);
        Ok(folders)
    }
}
