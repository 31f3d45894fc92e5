//! Notification kinds, their arguments, and the per-kind handler registry

use crate::entry::{Entry, EntryKind};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The six notifications fired by a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Search started, before the scan runs
    SearchStarted,
    /// Search drained without cancellation. Informational only.
    SearchFinished,
    /// A file was discovered by the scan
    FileFound,
    /// A folder was discovered by the scan
    FolderFound,
    /// A file was accepted by the search filter
    FilteredFileFound,
    /// A folder was accepted by the search filter
    FilteredFolderFound,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::SearchStarted,
        EventKind::SearchFinished,
        EventKind::FileFound,
        EventKind::FolderFound,
        EventKind::FilteredFileFound,
        EventKind::FilteredFolderFound,
    ];

    pub fn found(kind: EntryKind) -> Self {
        match kind {
            EntryKind::File => EventKind::FileFound,
            EntryKind::Folder => EventKind::FolderFound,
        }
    }

    pub fn filtered_found(kind: EntryKind) -> Self {
        match kind {
            EntryKind::File => EventKind::FilteredFileFound,
            EntryKind::Folder => EventKind::FilteredFolderFound,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::SearchStarted => "SearchStarted",
            EventKind::SearchFinished => "SearchFinished",
            EventKind::FileFound => "FileFound",
            EventKind::FolderFound => "FolderFound",
            EventKind::FilteredFileFound => "FilteredFileFound",
            EventKind::FilteredFolderFound => "FilteredFolderFound",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flags read back by the visitor after every handler of a firing has run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationOutcome {
    pub cancel_requested: bool,
    pub exclude_requested: bool,
}

/// Arguments handed to each handler of a single firing.
///
/// Requests can be raised but never withdrawn, so the outcome is the OR of
/// every handler's requests.
#[derive(Debug)]
pub struct EventArgs<'a> {
    kind: EventKind,
    root: &'a str,
    entry: Option<&'a Entry>,
    outcome: NotificationOutcome,
}

impl<'a> EventArgs<'a> {
    pub fn new(kind: EventKind, root: &'a str) -> Self {
        Self {
            kind,
            root,
            entry: None,
            outcome: NotificationOutcome::default(),
        }
    }

    pub fn for_entry(kind: EventKind, root: &'a str, entry: &'a Entry) -> Self {
        Self {
            entry: Some(entry),
            ..Self::new(kind, root)
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn root(&self) -> &'a str {
        self.root
    }

    pub fn entry(&self) -> Option<&'a Entry> {
        self.entry
    }

    pub fn path(&self) -> Option<&'a str> {
        self.entry.map(|e| e.path.as_str())
    }

    pub fn request_cancel(&mut self) {
        self.outcome.cancel_requested = true;
    }

    pub fn request_exclude(&mut self) {
        self.outcome.exclude_requested = true;
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.outcome.cancel_requested
    }

    pub fn is_exclude_requested(&self) -> bool {
        self.outcome.exclude_requested
    }

    pub fn outcome(&self) -> NotificationOutcome {
        self.outcome
    }

    /// Human-readable form used by verbose event logging
    pub fn description(&self) -> String {
        match (self.kind, self.entry) {
            (EventKind::SearchStarted, _) => {
                format!("SearchStarted, Target Folder: {}", self.root)
            }
            (EventKind::SearchFinished, _) => "SearchFinished".to_string(),
            (kind, Some(entry)) => format!("{}: {}", kind, entry.path),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Trait for observers attached to a visitor
pub trait EventHandler: Send + Sync {
    /// Called synchronously for every firing of the kinds this handler is attached to
    fn handle(&self, args: &mut EventArgs<'_>);
}

impl<H: EventHandler + ?Sized> EventHandler for Arc<H> {
    fn handle(&self, args: &mut EventArgs<'_>) {
        (**self).handle(args)
    }
}

impl<H: EventHandler + ?Sized> EventHandler for Box<H> {
    fn handle(&self, args: &mut EventArgs<'_>) {
        (**self).handle(args)
    }
}

struct FnHandler<F>(F);

impl<F> EventHandler for FnHandler<F>
where
    F: Fn(&mut EventArgs<'_>) + Send + Sync,
{
    fn handle(&self, args: &mut EventArgs<'_>) {
        (self.0)(args)
    }
}

/// Ordered handler lists, one per event kind
#[derive(Default)]
pub struct EventHandlers {
    handlers: HashMap<EventKind, Vec<Box<dyn EventHandler>>>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: Fn(&mut EventArgs<'_>) + Send + Sync + 'static,
    {
        self.subscribe_handler(kind, FnHandler(handler));
    }

    pub fn subscribe_handler(&mut self, kind: EventKind, handler: impl EventHandler + 'static) {
        self.handlers
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
    }

    /// Attaches one shared handler to every event kind
    pub fn subscribe_all<H: EventHandler + 'static>(&mut self, handler: Arc<H>) {
        for kind in EventKind::ALL {
            self.subscribe_handler(kind, Arc::clone(&handler));
        }
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Invokes the handlers attached to `args.kind()` in attachment order
    pub fn fire(&self, args: &mut EventArgs<'_>) -> NotificationOutcome {
        if let Some(handlers) = self.handlers.get(&args.kind) {
            for handler in handlers {
                handler.handle(args);
            }
        }
        args.outcome()
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in EventKind::ALL {
            map.entry(&kind, &self.count(kind));
        }
        map.finish()
    }
}
