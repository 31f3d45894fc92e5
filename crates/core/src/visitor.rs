//! The visitor engine: discovery notifications, filtering and the lazy search sequence

use crate::config::VisitorConfig;
use crate::entry::Entry;
use crate::error::VisitError;
use crate::events::{
    format_event_log, EventArgs, EventHandler, EventHandlers, EventKind, EventSink,
    NotificationOutcome, TracingSink,
};
use crate::filter::EntryFilter;
use crate::fs::FileSystem;
use std::iter::FusedIterator;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Walks the tree under a fixed root and lets handlers veto entries as they are found.
///
/// Each call to [`list_all`](Self::list_all) or [`search`](Self::search) re-reads the
/// file system; nothing is cached between calls.
pub struct FileSystemVisitor<F: FileSystem> {
    config: VisitorConfig,
    fs: F,
    handlers: EventHandlers,
    sink: Box<dyn EventSink>,
}

impl<F: FileSystem> FileSystemVisitor<F> {
    pub fn new(config: VisitorConfig, fs: F) -> Self {
        Self {
            config,
            fs,
            handlers: EventHandlers::new(),
            sink: Box::new(TracingSink),
        }
    }

    /// Replaces the destination of `[EVENT]` lines
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn subscribe<H>(&mut self, kind: EventKind, handler: H) -> &mut Self
    where
        H: Fn(&mut EventArgs<'_>) + Send + Sync + 'static,
    {
        self.handlers.subscribe(kind, handler);
        self
    }

    pub fn subscribe_handler(
        &mut self,
        kind: EventKind,
        handler: impl EventHandler + 'static,
    ) -> &mut Self {
        self.handlers.subscribe_handler(kind, handler);
        self
    }

    pub fn subscribe_all<H: EventHandler + 'static>(&mut self, handler: Arc<H>) -> &mut Self {
        self.handlers.subscribe_all(handler);
        self
    }

    /// Returns the raw scan, unfiltered and without notifications
    pub fn list_all(&self) -> Result<Vec<Entry>, VisitError> {
        self.verify_target_exists()?;
        self.read_entries()
    }

    /// Starts a search.
    ///
    /// The scan and the discovery notifications run before this returns; filtering and
    /// the filtered-found notifications run one candidate at a time as the returned
    /// iterator is advanced.
    pub fn search(&self) -> Result<Search<'_, F>, VisitError> {
        self.verify_target_exists()?;
        let filter = self.config.filter.as_ref().ok_or(VisitError::MissingFilter)?;

        self.fire_search_started()?;

        let entries = self.read_entries()?;
        let total = entries.len();

        let mut candidates = Vec::with_capacity(total);
        for entry in entries {
            if !self.fire_found(&entry)? {
                candidates.push(entry);
            }
        }

        debug!(
            root = %self.config.root_path,
            scanned = total,
            candidates = candidates.len(),
            "Discovery phase complete"
        );

        Ok(Search {
            visitor: self,
            filter,
            candidates: candidates.into_iter(),
            done: false,
        })
    }

    fn verify_target_exists(&self) -> Result<(), VisitError> {
        if !self.fs.exists(Path::new(&self.config.root_path)) {
            return Err(VisitError::TargetNotFound(self.config.root_path.clone()));
        }
        Ok(())
    }

    fn read_entries(&self) -> Result<Vec<Entry>, VisitError> {
        let entries = self
            .fs
            .scan(Path::new(&self.config.root_path))
            .map_err(VisitError::Scan)?;
        debug!(root = %self.config.root_path, entries = entries.len(), "Scan complete");
        Ok(entries)
    }

    fn notify(&self, mut args: EventArgs<'_>) -> NotificationOutcome {
        if self.config.log_events {
            self.sink.emit(&format_event_log(&args.description()));
        }
        self.handlers.fire(&mut args)
    }

    fn fire_search_started(&self) -> Result<(), VisitError> {
        let outcome = self.notify(EventArgs::new(
            EventKind::SearchStarted,
            &self.config.root_path,
        ));
        if outcome.cancel_requested {
            debug!("Search cancelled before scanning");
            return Err(VisitError::SearchCancelled);
        }
        Ok(())
    }

    fn fire_search_finished(&self) {
        self.notify(EventArgs::new(
            EventKind::SearchFinished,
            &self.config.root_path,
        ));
    }

    /// Returns whether the entry was excluded
    fn fire_found(&self, entry: &Entry) -> Result<bool, VisitError> {
        self.fire_entry_event(EventKind::found(entry.kind), entry)
    }

    /// Returns whether the entry was excluded
    fn fire_filtered_found(&self, entry: &Entry) -> Result<bool, VisitError> {
        self.fire_entry_event(EventKind::filtered_found(entry.kind), entry)
    }

    fn fire_entry_event(&self, kind: EventKind, entry: &Entry) -> Result<bool, VisitError> {
        let outcome = self.notify(EventArgs::for_entry(kind, &self.config.root_path, entry));
        if outcome.cancel_requested {
            debug!(event = %kind, path = %entry.path, "Search cancelled by handler");
            return Err(VisitError::SearchCancelled);
        }
        Ok(outcome.exclude_requested)
    }
}

/// Lazy result sequence of [`FileSystemVisitor::search`].
///
/// Yields `Err(VisitError::SearchCancelled)` once if a handler cancels mid-stream, and
/// `None` from then on. `SearchFinished` fires when the caller pulls past the last
/// entry, so abandoning the iterator early never fires it.
pub struct Search<'a, F: FileSystem> {
    visitor: &'a FileSystemVisitor<F>,
    filter: &'a EntryFilter,
    candidates: std::vec::IntoIter<Entry>,
    done: bool,
}

impl<F: FileSystem> Search<'_, F> {
    /// Candidates that survived discovery and have not been evaluated yet
    pub fn remaining_candidates(&self) -> usize {
        self.candidates.len()
    }
}

impl<F: FileSystem> Iterator for Search<'_, F> {
    type Item = Result<Entry, VisitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        for entry in self.candidates.by_ref() {
            if !self.filter.matches(&entry) {
                continue;
            }

            match self.visitor.fire_filtered_found(&entry) {
                Ok(true) => continue,
                Ok(false) => return Some(Ok(entry)),
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }

        self.done = true;
        self.visitor.fire_search_finished();
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.candidates.len() + 1))
        }
    }
}

impl<F: FileSystem> FusedIterator for Search<'_, F> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use mockall::mock;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    mock! {
        Reader {}

        impl FileSystem for Reader {
            fn exists(&self, path: &Path) -> bool;
            fn scan(&self, path: &Path) -> anyhow::Result<Vec<Entry>>;
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<String>>,
    }

    impl EventSink for RecordingSink {
        fn emit(&self, line: &str) {
            self.lines.lock().unwrap().push(line.to_string());
        }
    }

    fn sample_fs() -> MockFileSystem {
        MockFileSystem::from_entries(
            "/r",
            [
                Entry::file("/r/a.txt"),
                Entry::file("/r/b.txt"),
                Entry::folder("/r/sub"),
            ],
        )
    }

    #[test]
    fn test_missing_filter_never_scans() {
        let mut reader = MockReader::new();
        reader.expect_exists().return_const(true);
        reader.expect_scan().times(0);

        let visitor = FileSystemVisitor::new(VisitorConfig::new("/r"), reader);
        assert!(matches!(visitor.search(), Err(VisitError::MissingFilter)));
    }

    #[test]
    fn test_missing_target_never_scans() {
        let mut reader = MockReader::new();
        reader.expect_exists().return_const(false);
        reader.expect_scan().times(0);

        let visitor = FileSystemVisitor::new(
            VisitorConfig::new("/missing").with_filter(EntryFilter::accept_all()),
            reader,
        );
        assert!(matches!(
            visitor.list_all(),
            Err(VisitError::TargetNotFound(path)) if path == "/missing"
        ));
        assert!(matches!(
            visitor.search(),
            Err(VisitError::TargetNotFound(_))
        ));
    }

    #[test]
    fn test_scan_once_per_search() {
        let mut reader = MockReader::new();
        reader.expect_exists().return_const(true);
        reader
            .expect_scan()
            .times(2)
            .returning(|_| Ok(vec![Entry::file("/r/a.txt")]));

        let visitor = FileSystemVisitor::new(
            VisitorConfig::new("/r").with_filter(EntryFilter::accept_all()),
            reader,
        );

        for _ in 0..2 {
            let found: Vec<Entry> = visitor.search().unwrap().map(Result::unwrap).collect();
            assert_eq!(found, vec![Entry::file("/r/a.txt")]);
        }
    }

    #[test]
    fn test_scan_failure_propagates() {
        let fs = sample_fs();
        fs.fail_scan("access denied");

        let visitor = FileSystemVisitor::new(
            VisitorConfig::new("/r").with_filter(EntryFilter::accept_all()),
            fs,
        );

        match visitor.search() {
            Err(VisitError::Scan(source)) => assert_eq!(source.to_string(), "access denied"),
            _ => panic!("Expected Scan error"),
        }
        assert!(matches!(visitor.list_all(), Err(VisitError::Scan(_))));
    }

    #[test]
    fn test_list_all_fires_nothing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut visitor = FileSystemVisitor::new(VisitorConfig::new("/r"), sample_fs());
        for kind in EventKind::ALL {
            let fired = fired.clone();
            visitor.subscribe(kind, move |args| {
                fired.fetch_add(1, Ordering::SeqCst);
                args.request_cancel();
            });
        }

        let entries = visitor.list_all().unwrap();
        assert_eq!(entries, sample_fs().scan(Path::new("/r")).unwrap());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_phase_two_is_lazy() {
        let evaluated = Arc::new(AtomicUsize::new(0));
        let counter = evaluated.clone();
        let filter = EntryFilter::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        let visitor =
            FileSystemVisitor::new(VisitorConfig::new("/r").with_filter(filter), sample_fs());
        let mut search = visitor.search().unwrap();

        assert_eq!(evaluated.load(Ordering::SeqCst), 0);
        assert_eq!(search.remaining_candidates(), 3);

        assert_eq!(search.next().unwrap().unwrap(), Entry::file("/r/a.txt"));
        assert_eq!(evaluated.load(Ordering::SeqCst), 1);
        assert_eq!(search.remaining_candidates(), 2);
    }

    #[test]
    fn test_search_finished_only_after_drain() {
        let finished = Arc::new(AtomicUsize::new(0));
        let mut visitor = FileSystemVisitor::new(
            VisitorConfig::new("/r").with_filter(EntryFilter::accept_all()),
            sample_fs(),
        );
        let counter = finished.clone();
        visitor.subscribe(EventKind::SearchFinished, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut search = visitor.search().unwrap();
        for _ in 0..3 {
            assert!(search.next().unwrap().is_ok());
        }
        assert_eq!(finished.load(Ordering::SeqCst), 0);

        assert!(search.next().is_none());
        assert!(search.next().is_none());
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_in_phase_two_is_terminal() {
        let mut visitor = FileSystemVisitor::new(
            VisitorConfig::new("/r").with_filter(EntryFilter::accept_all()),
            sample_fs(),
        );
        visitor.subscribe(EventKind::FilteredFileFound, |args| {
            if args.path() == Some("/r/b.txt") {
                args.request_cancel();
            }
        });

        let mut search = visitor.search().unwrap();
        assert_eq!(search.next().unwrap().unwrap(), Entry::file("/r/a.txt"));
        assert!(search.next().unwrap().unwrap_err().is_cancelled());
        assert!(search.next().is_none());
        assert_eq!(search.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_event_log_precedes_handlers() {
        let sink = Arc::new(RecordingSink::default());
        let mut visitor = FileSystemVisitor::new(
            VisitorConfig::new("/r")
                .with_filter(EntryFilter::new(|e| e.path.ends_with("b.txt")))
                .with_log_events(true),
            sample_fs(),
        )
        .with_sink(sink.clone());

        let sink_in_handler = sink.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_handler = seen.clone();
        visitor.subscribe(EventKind::FileFound, move |_| {
            seen_in_handler
                .lock()
                .unwrap()
                .push(sink_in_handler.lines.lock().unwrap().len());
        });

        let found: Vec<Entry> = visitor.search().unwrap().map(Result::unwrap).collect();
        assert_eq!(found, vec![Entry::file("/r/b.txt")]);

        // SearchStarted + own FileFound line already written when each handler runs
        assert_eq!(*seen.lock().unwrap(), vec![2, 3]);
        assert_eq!(
            *sink.lines.lock().unwrap(),
            vec![
                "[EVENT] SearchStarted, Target Folder: /r",
                "[EVENT] FileFound: /r/a.txt",
                "[EVENT] FileFound: /r/b.txt",
                "[EVENT] FolderFound: /r/sub",
                "[EVENT] FilteredFileFound: /r/b.txt",
                "[EVENT] SearchFinished",
            ]
        );
    }

    #[test]
    fn test_event_log_disabled() {
        let sink = Arc::new(RecordingSink::default());
        let visitor = FileSystemVisitor::new(
            VisitorConfig::new("/r").with_filter(EntryFilter::accept_all()),
            sample_fs(),
        )
        .with_sink(sink.clone());

        assert_eq!(visitor.search().unwrap().count(), 3);
        assert!(sink.lines.lock().unwrap().is_empty());
    }
}
