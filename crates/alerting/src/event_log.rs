//! Event log sink

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

/// Event log errors
#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("Lock error: {0}")]
    Poisoned(String),

    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),
}

/// Category attached to every logged event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    EvaluationStarted,
    AlertActive,
    NotificationSent,
    NotificationFailed,
    NoAlert,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::EvaluationStarted => "EVALUATION STARTED",
            Self::AlertActive => "ALERT ACTIVE",
            Self::NotificationSent => "NOTIFICATION SENT",
            Self::NotificationFailed => "NOTIFICATION FAILED",
            Self::NoAlert => "NO ALERT",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single timestamped entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
    pub message: String,
}

impl EventRecord {
    /// Stamp an event with the current UTC time
    pub fn new(kind: EventKind, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.kind,
            self.message
        )
    }
}

/// Append-only sink for evaluation events.
///
/// One instance is shared by every manager in a process; writes must keep
/// call order.
pub trait EventLog: Send + Sync {
    fn record_event(&self, kind: EventKind, message: &str) -> Result<(), EventLogError>;
}

/// Prints `[YYYY-MM-DD HH:MM:SS] KIND: message` lines (UTC) to stdout
#[derive(Debug, Default)]
pub struct ConsoleEventLog {
    // Serializes line writes across threads
    guard: Mutex<()>,
}

impl ConsoleEventLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventLog for ConsoleEventLog {
    fn record_event(&self, kind: EventKind, message: &str) -> Result<(), EventLogError> {
        let _guard = self
            .guard
            .lock()
            .map_err(|e| EventLogError::Poisoned(e.to_string()))?;

        let record = EventRecord::new(kind, message);
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", record)?;

        debug!(event = %kind, "{}", message);
        Ok(())
    }
}

/// In-memory event log, mainly for inspection and tests
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    events: Mutex<Vec<EventRecord>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events in recording order
    pub fn events(&self) -> Result<Vec<EventRecord>, EventLogError> {
        let events = self
            .events
            .lock()
            .map_err(|e| EventLogError::Poisoned(e.to_string()))?;
        Ok(events.clone())
    }

    /// Event kinds in recording order
    pub fn kinds(&self) -> Result<Vec<EventKind>, EventLogError> {
        Ok(self.events()?.into_iter().map(|e| e.kind).collect())
    }

    pub fn len(&self) -> Result<usize, EventLogError> {
        let events = self
            .events
            .lock()
            .map_err(|e| EventLogError::Poisoned(e.to_string()))?;
        Ok(events.len())
    }

    pub fn is_empty(&self) -> Result<bool, EventLogError> {
        Ok(self.len()? == 0)
    }
}

impl EventLog for MemoryEventLog {
    fn record_event(&self, kind: EventKind, message: &str) -> Result<(), EventLogError> {
        let mut events = self
            .events
            .lock()
            .map_err(|e| EventLogError::Poisoned(e.to_string()))?;

        events.push(EventRecord::new(kind, message));
        debug!(event = %kind, "{}", message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_labels() {
        assert_eq!(EventKind::EvaluationStarted.to_string(), "EVALUATION STARTED");
        assert_eq!(EventKind::AlertActive.to_string(), "ALERT ACTIVE");
        assert_eq!(EventKind::NotificationSent.to_string(), "NOTIFICATION SENT");
        assert_eq!(EventKind::NotificationFailed.to_string(), "NOTIFICATION FAILED");
        assert_eq!(EventKind::NoAlert.to_string(), "NO ALERT");
    }

    #[test]
    fn test_memory_log_keeps_order() {
        let log = MemoryEventLog::new();
        assert!(log.is_empty().unwrap());

        log.record_event(EventKind::EvaluationStarted, "start").unwrap();
        log.record_event(EventKind::NoAlert, "s1 ok").unwrap();

        let events = log.events().unwrap();
        assert_eq!(log.len().unwrap(), 2);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::EvaluationStarted);
        assert_eq!(events[1].message, "s1 ok");
        assert!(events[0].timestamp <= events[1].timestamp);
    }

    #[test]
    fn test_record_display_uses_utc_timestamp() {
        let record = EventRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
            kind: EventKind::NoAlert,
            message: "Sensor t1 within limits.".to_string(),
        };
        assert_eq!(
            record.to_string(),
            "[2024-03-09 14:05:07] NO ALERT: Sensor t1 within limits."
        );

        let stamped = EventRecord::new(EventKind::AlertActive, "hot");
        assert!(stamped.to_string().starts_with(&format!(
            "[{}]",
            stamped.timestamp.format("%Y-%m-%d %H:%M:%S")
        )));
    }

    #[test]
    fn test_record_serializes() {
        let log = MemoryEventLog::new();
        log.record_event(EventKind::AlertActive, "hot").unwrap();

        let json = serde_json::to_value(&log.events().unwrap()[0]).unwrap();
        assert_eq!(json["kind"], "AlertActive");
        assert_eq!(json["message"], "hot");
    }

    #[test]
    fn test_console_log_writes() {
        let log = ConsoleEventLog::new();
        assert!(log.record_event(EventKind::NoAlert, "console check").is_ok());
    }
}
