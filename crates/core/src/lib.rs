//! fsvisit-core - observable, cancellable file-system visitor
//!
//! A [`FileSystemVisitor`] scans everything under a root folder through a
//! [`FileSystem`] reader and fires notifications that let attached handlers
//! exclude entries or cancel the search:
//!
//! 1. `SearchStarted`
//! 2. `FileFound` / `FolderFound` for every scanned entry, eagerly
//! 3. `FilteredFileFound` / `FilteredFolderFound` for every entry the
//!    configured [`EntryFilter`] accepts, lazily as the search is iterated
//! 4. `SearchFinished` once the search has been drained
//!
//! # Example
//!
//! ```
//! use fsvisit_core::{Entry, EntryFilter, EventKind, FileSystemVisitor, MockFileSystem, VisitorConfig};
//!
//! let fs = MockFileSystem::with_root("/r");
//! fs.add_file("a.txt");
//! fs.add_file("b.txt");
//!
//! let config = VisitorConfig::new("/r").with_filter(EntryFilter::new(|e| e.path.ends_with(".txt")));
//! let mut visitor = FileSystemVisitor::new(config, fs);
//! visitor.subscribe(EventKind::FileFound, |args| {
//!     if args.path() == Some("/r/a.txt") {
//!         args.request_exclude();
//!     }
//! });
//!
//! let found: Vec<Entry> = visitor.search()?.collect::<Result<_, _>>()?;
//! assert_eq!(found, vec![Entry::file("/r/b.txt")]);
//! # Ok::<(), fsvisit_core::VisitError>(())
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod events;
pub mod filter;
pub mod fs;
pub mod visitor;

pub use config::{ConfigError, VisitorConfig};
pub use entry::{Entry, EntryKind};
pub use error::VisitError;
pub use events::{
    EventArgs, EventHandler, EventHandlers, EventKind, EventSink, NotificationOutcome,
    TracingSink, WriterSink,
};
pub use filter::EntryFilter;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use visitor::{FileSystemVisitor, Search};
