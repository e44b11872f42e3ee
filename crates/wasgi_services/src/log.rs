//! Log sinks
//!
//! Everything the host wants a human to read (guest `console` output and
//! guest failures) goes through a [`LogSink`]. The default sink forwards to
//! `tracing`; [`MemorySink`] keeps records for inspection.

use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    /// Where the text came from, e.g. `script` for guest console output.
    pub target: String,
    pub message: String,
}

/// External log channel.
pub trait LogSink {
    fn emit(&self, level: LogLevel, target: &str, message: &str);
}

/// Forwards records to the active `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, level: LogLevel, target: &str, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(origin = target, "{message}"),
            LogLevel::Info => tracing::info!(origin = target, "{message}"),
            LogLevel::Warn => tracing::warn!(origin = target, "{message}"),
            LogLevel::Error => tracing::error!(origin = target, "{message}"),
        }
    }
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RefCell<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.borrow().clone()
    }

    pub fn errors(&self) -> Vec<LogRecord> {
        self.records
            .borrow()
            .iter()
            .filter(|record| record.level == LogLevel::Error)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Drain everything captured so far.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.borrow_mut())
    }
}

impl LogSink for MemorySink {
    fn emit(&self, level: LogLevel, target: &str, message: &str) {
        self.records.borrow_mut().push(LogRecord {
            level,
            target: target.to_string(),
            message: message.to_string(),
        });
    }
}
