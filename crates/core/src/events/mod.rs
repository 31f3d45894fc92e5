//! Observer notifications fired while searching

mod handler;
mod sink;

pub use handler::{EventArgs, EventHandler, EventHandlers, EventKind, NotificationOutcome};
pub use sink::{format_event_log, EventSink, TracingSink, WriterSink, EVENT_LOG_PREFIX};
