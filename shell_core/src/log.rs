//! Operator log
//!
//! Structured entries for the shell's operator. Every entry is also emitted
//! through `tracing`.

use std::collections::VecDeque;

/// Entries kept before the oldest is dropped
pub const DEFAULT_LOG_CAPACITY: usize = 256;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Component that produced the entry
    pub source: Option<String>,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            source: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Sets the source component
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((key.into(), value.to_string()));
        self
    }

    /// Looks up a field value
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Bounded log of operator-facing entries
#[derive(Debug, Clone)]
pub struct OperatorLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl OperatorLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Records an entry
    pub fn record(&mut self, entry: LogEntry) {
        emit(&entry);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn debug(&mut self, source: &str, message: impl Into<String>) {
        self.record(LogEntry::new(LogLevel::Debug, message).with_source(source));
    }

    pub fn info(&mut self, source: &str, message: impl Into<String>) {
        self.record(LogEntry::new(LogLevel::Info, message).with_source(source));
    }

    pub fn warn(&mut self, source: &str, message: impl Into<String>) {
        self.record(LogEntry::new(LogLevel::Warn, message).with_source(source));
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entries at `Warn` or above
    pub fn warnings(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| e.level >= LogLevel::Warn)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for OperatorLog {
    fn default() -> Self {
        Self::new()
    }
}

fn emit(entry: &LogEntry) {
    let source = entry.source.as_deref().unwrap_or("shell");
    let fields = &entry.fields;
    match entry.level {
        LogLevel::Debug => {
            tracing::debug!(target: "shell.operator", source, ?fields, "{}", entry.message)
        }
        LogLevel::Info => {
            tracing::info!(target: "shell.operator", source, ?fields, "{}", entry.message)
        }
        LogLevel::Warn => {
            tracing::warn!(target: "shell.operator", source, ?fields, "{}", entry.message)
        }
        LogLevel::Error => {
            tracing::error!(target: "shell.operator", source, ?fields, "{}", entry.message)
        }
    }
}
