use super::FileSystem;
use crate::entry::{Entry, EntryKind};
use anyhow::{anyhow, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// In-memory directory tree. Entries are scanned back in insertion order.
pub struct MockFileSystem {
    entries: RwLock<Vec<Entry>>,
    root: PathBuf,
    scan_error: RwLock<Option<String>>,
    scans: AtomicUsize,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root("/mock")
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            root: root.into(),
            scan_error: RwLock::new(None),
            scans: AtomicUsize::new(0),
        }
    }

    /// Builds a tree whose scan returns exactly `entries`, in the given order
    pub fn from_entries(root: impl Into<PathBuf>, entries: impl IntoIterator<Item = Entry>) -> Self {
        let fs = Self::with_root(root);
        for entry in entries {
            fs.add_entry(entry);
        }
        fs
    }

    /// Adds a file, creating any missing parent folders below the root first
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        if let Some(parent) = path.parent() {
            self.ensure_parents(parent);
        }
        self.push(EntryKind::File, &path);
    }

    /// Adds a folder, creating any missing parent folders below the root first
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.ensure_parents(&path);
    }

    /// Appends an entry verbatim, without creating parents
    pub fn add_entry(&self, entry: Entry) {
        self.entries.write().unwrap().push(entry);
    }

    /// Makes every following scan fail with a permission error
    pub fn fail_scan(&self, message: &str) {
        *self.scan_error.write().unwrap() = Some(message.to_string());
    }

    /// Number of times `scan` has been called
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(&self, path: &Path) {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return;
        };

        let mut current = self.root.clone();
        for component in relative.components() {
            current.push(component);
            if !self.contains(&current) {
                self.push(EntryKind::Folder, &current);
            }
        }
    }

    fn contains(&self, path: &Path) -> bool {
        self.entries
            .read()
            .unwrap()
            .iter()
            .any(|e| Path::new(&e.path) == path)
    }

    fn push(&self, kind: EntryKind, path: &Path) {
        self.add_entry(Entry::new(kind, path.to_string_lossy()));
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        if path == self.root {
            return true;
        }
        self.entries
            .read()
            .unwrap()
            .iter()
            .any(|e| e.is_folder() && Path::new(&e.path) == path)
    }

    fn scan(&self, path: &Path) -> Result<Vec<Entry>> {
        self.scans.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.scan_error.read().unwrap().as_ref() {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, message.clone()).into());
        }

        let path = self.normalize_path(path);
        if !self.exists(&path) {
            return Err(anyhow!("Directory not found: {:?}", path));
        }

        let entries = self.entries.read().unwrap();
        Ok(entries
            .iter()
            .filter(|e| {
                let entry_path = Path::new(&e.path);
                entry_path != path && entry_path.starts_with(&path)
            })
            .cloned()
            .collect())
    }
}
