//! Structured reporting used by the backup core.
//!
//! Components receive a `&dyn Reporter` instead of reaching for a global
//! logger, so tests can swap in a [`RecordingReporter`] and inspect what
//! was reported.

use log::Level;
use std::cell::RefCell;
use std::fmt::Display;

/// Sink for structured log entries
pub trait Reporter {
    /// Record a message with contextual `key=value` fields.
    fn log(&self, level: Level, message: &str, fields: &[(&str, &dyn Display)]);

    fn debug(&self, message: &str, fields: &[(&str, &dyn Display)]) {
        self.log(Level::Debug, message, fields);
    }

    fn info(&self, message: &str, fields: &[(&str, &dyn Display)]) {
        self.log(Level::Info, message, fields);
    }

    fn warn(&self, message: &str, fields: &[(&str, &dyn Display)]) {
        self.log(Level::Warn, message, fields);
    }
}

/// Render fields as `key="value"` pairs separated by spaces
pub fn format_fields(fields: &[(&str, &dyn Display)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Forwards entries to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn log(&self, level: Level, message: &str, fields: &[(&str, &dyn Display)]) {
        if fields.is_empty() {
            log::log!(level, "{message}");
        } else {
            log::log!(level, "{message} {}", format_fields(fields));
        }
    }
}

/// A captured report entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEntry {
    pub level: Level,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl RecordedEntry {
    /// Look up the rendered value of a field
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Keeps every entry in memory, for assertions in tests
#[derive(Debug, Default)]
pub struct RecordingReporter {
    entries: RefCell<Vec<RecordedEntry>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<RecordedEntry> {
        self.entries.borrow().clone()
    }

    /// Entries at exactly `level`
    pub fn at_level(&self, level: Level) -> Vec<RecordedEntry> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn log(&self, level: Level, message: &str, fields: &[(&str, &dyn Display)]) {
        self.entries.borrow_mut().push(RecordedEntry {
            level,
            message: message.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }
}
