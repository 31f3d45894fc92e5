//! Entries discovered under a visitor's root folder

use serde::Serialize;
use std::fmt;

/// Kind of a discovered entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryKind {
    File,
    Folder,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "File"),
            EntryKind::Folder => write!(f, "Folder"),
        }
    }
}

/// A file or folder found by a scan. Identity is kind + path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    pub kind: EntryKind,
    pub path: String,
}

impl Entry {
    pub fn new(kind: EntryKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self::new(EntryKind::File, path)
    }

    pub fn folder(path: impl Into<String>) -> Self {
        Self::new(EntryKind::Folder, path)
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.path)
    }
}
