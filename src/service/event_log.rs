//! Injected logging capability for the dispatcher.
//!
//! Front ends and tests pick where transfer events go: `tracing`, an in-memory
//! buffer they can render or assert on, or nowhere.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: EventLevel,
    pub request_id: String,
    pub message: String,
}

impl LogEntry {
    /// `[2026-01-01 12:00:00] INFO <request>: message`
    pub fn render(&self) -> String {
        let level = match self.level {
            EventLevel::Info => "INFO",
            EventLevel::Warn => "WARN",
            EventLevel::Error => "ERROR",
        };
        format!(
            "[{}] {} {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            level,
            self.request_id,
            self.message
        )
    }
}

pub trait EventLog: Send + Sync {
    fn record(&self, level: EventLevel, request_id: &str, message: &str);

    fn info(&self, request_id: &str, message: &str) {
        self.record(EventLevel::Info, request_id, message);
    }

    fn warn(&self, request_id: &str, message: &str) {
        self.record(EventLevel::Warn, request_id, message);
    }

    fn error(&self, request_id: &str, message: &str) {
        self.record(EventLevel::Error, request_id, message);
    }
}

/// Forwards every event to `tracing` under the `transfer` target.
#[derive(Debug, Default, Clone)]
pub struct TracingEventLog;

impl EventLog for TracingEventLog {
    fn record(&self, level: EventLevel, request_id: &str, message: &str) {
        match level {
            EventLevel::Info => info!(target: "transfer", request_id, "{}", message),
            EventLevel::Warn => warn!(target: "transfer", request_id, "{}", message),
            EventLevel::Error => error!(target: "transfer", request_id, "{}", message),
        }
    }
}

/// Keeps timestamped entries in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryEventLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drain everything recorded so far, oldest first.
    pub fn take(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl EventLog for MemoryEventLog {
    fn record(&self, level: EventLevel, request_id: &str, message: &str) {
        self.entries.lock().push(LogEntry {
            timestamp: Utc::now(),
            level,
            request_id: request_id.to_string(),
            message: message.to_string(),
        });
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventLog;

impl EventLog for NullEventLog {
    fn record(&self, _level: EventLevel, _request_id: &str, _message: &str) {}
}
