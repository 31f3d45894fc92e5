//! Diagnostic sinks for verbose event logging

use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Prefix of every event log line
pub const EVENT_LOG_PREFIX: &str = "[EVENT]";

pub fn format_event_log(description: &str) -> String {
    format!("{} {}", EVENT_LOG_PREFIX, description)
}

/// Destination for `[EVENT]` lines. Sinks must not fail the search.
pub trait EventSink: Send + Sync {
    fn emit(&self, line: &str);
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn emit(&self, line: &str) {
        (**self).emit(line)
    }
}

/// Sink that logs event lines using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, line: &str) {
        info!(target: "fsvisit::events", "{}", line);
    }
}

/// Sink that writes one event line per call to any writer
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> EventSink for WriterSink<W> {
    fn emit(&self, line: &str) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line) {
            warn!("Failed to write event log line: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_event_log() {
        assert_eq!(format_event_log("SearchFinished"), "[EVENT] SearchFinished");
    }

    #[test]
    fn test_writer_sink() {
        let sink = WriterSink::new(Vec::new());
        sink.emit("[EVENT] FileFound: /r/a.txt");
        sink.emit("[EVENT] SearchFinished");

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "[EVENT] FileFound: /r/a.txt\n[EVENT] SearchFinished\n");
    }

    #[test]
    fn test_tracing_sink_doesnt_panic() {
        TracingSink.emit("[EVENT] SearchFinished");
    }
}
