//! Alert Manager Implementation

use crate::event_log::{EventKind, EventLog};
use crate::notifier::Notifier;
use crate::AlertError;
use sensors::Sensor;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one evaluation cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationReport {
    /// Sensors evaluated
    pub sensors_evaluated: usize,
    /// Ids of sensors found in alert, in evaluation order
    pub alerting: Vec<String>,
    /// Successful notifier deliveries
    pub notifications_sent: usize,
    /// Failed notifier deliveries
    pub notification_failures: usize,
}

impl EvaluationReport {
    pub fn alert_count(&self) -> usize {
        self.alerting.len()
    }
}

/// Groups sensors with the notifiers that hear about their alerts
pub struct AlertManager {
    /// Sensors in registration order
    sensors: Vec<Sensor>,
    /// Notifiers in registration order
    notifiers: Vec<Box<dyn Notifier>>,
    /// Shared event log
    log: Arc<dyn EventLog>,
}

impl AlertManager {
    /// Create an empty alert manager
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self {
            sensors: Vec::new(),
            notifiers: Vec::new(),
            log,
        }
    }

    /// Create a manager from existing sensors and notifiers
    pub fn with_parts(
        sensors: Vec<Sensor>,
        notifiers: Vec<Box<dyn Notifier>>,
        log: Arc<dyn EventLog>,
    ) -> Result<Self, AlertError> {
        let mut manager = Self::new(log);
        for sensor in sensors {
            manager.add_sensor(sensor)?;
        }
        for notifier in notifiers {
            manager.add_notifier(notifier);
        }
        info!(
            "Creating alert manager with {} sensors and {} notifiers",
            manager.sensors.len(),
            manager.notifiers.len()
        );
        Ok(manager)
    }

    /// Register a sensor; ids are unique within a manager
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<(), AlertError> {
        if self.contains(sensor.id()) {
            return Err(AlertError::DuplicateSensor(sensor.id().to_string()));
        }
        debug!("Registered sensor {}", sensor.id());
        self.sensors.push(sensor);
        Ok(())
    }

    /// Register a notifier
    pub fn add_notifier(&mut self, notifier: Box<dyn Notifier>) {
        debug!("Registered {} notifier", notifier.name());
        self.notifiers.push(notifier);
    }

    /// Feed a raw reading to the sensor with the given id
    pub fn record_reading(&mut self, sensor_id: &str, value: f64) -> Result<(), AlertError> {
        let sensor = self
            .sensor_mut(sensor_id)
            .ok_or_else(|| AlertError::UnknownSensor(sensor_id.to_string()))?;
        sensor.record_reading(value);
        Ok(())
    }

    /// Evaluate every sensor and notify on alerts.
    ///
    /// Sensors run in registration order; an alerting sensor reaches every
    /// notifier, in registration order, before the next sensor is checked.
    /// A failed delivery is logged and the remaining notifiers still run. A
    /// failed log write ends the cycle.
    pub fn evaluate_and_notify(&self) -> Result<EvaluationReport, AlertError> {
        self.log
            .record_event(EventKind::EvaluationStarted, "Starting sensor evaluation...")?;

        let mut report = EvaluationReport::default();
        for sensor in &self.sensors {
            report.sensors_evaluated += 1;

            if !sensor.is_in_alert() {
                self.log.record_event(
                    EventKind::NoAlert,
                    &format!("Sensor {} within limits.", sensor.id()),
                )?;
                continue;
            }

            let message = format!(
                "ALERT: Sensor {} at threshold (avg={:.2})",
                sensor.id(),
                sensor.average()
            );
            self.log.record_event(EventKind::AlertActive, &message)?;
            report.alerting.push(sensor.id().to_string());

            for notifier in &self.notifiers {
                match notifier.send(&message) {
                    Ok(()) => {
                        report.notifications_sent += 1;
                        self.log.record_event(
                            EventKind::NotificationSent,
                            &format!("Notification sent for {}", sensor.id()),
                        )?;
                    }
                    Err(e) => {
                        warn!("{} notifier failed for {}: {}", notifier.name(), sensor.id(), e);
                        report.notification_failures += 1;
                        self.log.record_event(
                            EventKind::NotificationFailed,
                            &format!(
                                "Notification for {} via {} failed: {}",
                                sensor.id(),
                                notifier.name(),
                                e
                            ),
                        )?;
                    }
                }
            }
        }

        debug!(
            "Evaluation complete: {} sensors, {} alerts",
            report.sensors_evaluated,
            report.alert_count()
        );
        Ok(report)
    }

    /// Whether a sensor with this id is registered
    pub fn contains(&self, sensor_id: &str) -> bool {
        self.sensors.iter().any(|s| s.id() == sensor_id)
    }

    pub fn sensor(&self, sensor_id: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id() == sensor_id)
    }

    pub fn sensor_mut(&mut self, sensor_id: &str) -> Option<&mut Sensor> {
        self.sensors.iter_mut().find(|s| s.id() == sensor_id)
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }
}
