//! Alerting System
//!
//! Polls sensors for threshold crossings, fans alert messages out to every
//! registered notifier, and records each step in an injected event log.

mod event_log;
mod manager;
mod notifier;
mod plant;
mod settings;

pub use event_log::{ConsoleEventLog, EventKind, EventLog, EventLogError, EventRecord, MemoryEventLog};
pub use manager::{AlertManager, EvaluationReport};
pub use notifier::{ConsoleNotifier, EmailNotifier, Notifier, NotifyError, WebhookNotifier};
pub use plant::{Plant, PlantReport};
pub use settings::{ConfigError, ManagerConfig, NotifierConfig, PlantConfig, SensorSpec};

use thiserror::Error;

/// Errors raised while managing or evaluating sensors
#[derive(Debug, Error)]
pub enum AlertError {
    /// The event log rejected a write; the evaluation cycle stops
    #[error("Event log failure: {0}")]
    Log(#[from] EventLogError),

    #[error("Unknown sensor: {0}")]
    UnknownSensor(String),

    #[error("Unknown manager index: {0}")]
    UnknownManager(usize),

    #[error("Duplicate sensor id: {0}")]
    DuplicateSensor(String),
}
