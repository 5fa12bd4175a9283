//! Plant composition

use crate::manager::{AlertManager, EvaluationReport};
use crate::AlertError;
use serde::Serialize;
use tracing::info;

/// Aggregated outcome of one plant-wide evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlantReport {
    /// Per-manager reports in registration order
    pub managers: Vec<EvaluationReport>,
}

impl PlantReport {
    pub fn alert_count(&self) -> usize {
        self.managers.iter().map(|r| r.alert_count()).sum()
    }

    pub fn notifications_sent(&self) -> usize {
        self.managers.iter().map(|r| r.notifications_sent).sum()
    }

    pub fn notification_failures(&self) -> usize {
        self.managers.iter().map(|r| r.notification_failures).sum()
    }
}

/// Owns every alert manager of an installation
#[derive(Default)]
pub struct Plant {
    managers: Vec<AlertManager>,
}

impl Plant {
    pub fn new(managers: Vec<AlertManager>) -> Self {
        Self { managers }
    }

    /// Append a manager; no duplicate check
    pub fn add_manager(&mut self, manager: AlertManager) {
        self.managers.push(manager);
    }

    /// Run every manager in registration order.
    ///
    /// The first error stops the pass and is returned.
    pub fn evaluate_all(&self) -> Result<PlantReport, AlertError> {
        info!("Starting evaluation of {} managers", self.managers.len());

        let mut report = PlantReport::default();
        for manager in &self.managers {
            report.managers.push(manager.evaluate_and_notify()?);
        }

        info!(
            "Evaluation finished: {} alerts, {} notifications sent",
            report.alert_count(),
            report.notifications_sent()
        );
        Ok(report)
    }

    /// Feed a reading to a sensor of the manager at `manager`.
    ///
    /// Sensor ids are only unique within one manager, so the manager is
    /// addressed by position.
    pub fn record_reading(
        &mut self,
        manager: usize,
        sensor_id: &str,
        value: f64,
    ) -> Result<(), AlertError> {
        self.managers
            .get_mut(manager)
            .ok_or(AlertError::UnknownManager(manager))?
            .record_reading(sensor_id, value)
    }

    pub fn managers(&self) -> &[AlertManager] {
        &self.managers
    }

    pub fn managers_mut(&mut self) -> &mut [AlertManager] {
        &mut self.managers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_log::{EventKind, EventLog, EventLogError, MemoryEventLog};
    use sensors::Sensor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fails every write after the first `limit`
    struct LimitedLog {
        inner: MemoryEventLog,
        writes: AtomicUsize,
        limit: usize,
    }

    impl EventLog for LimitedLog {
        fn record_event(&self, kind: EventKind, message: &str) -> Result<(), EventLogError> {
            if self.writes.fetch_add(1, Ordering::SeqCst) >= self.limit {
                return Err(EventLogError::Poisoned("full".into()));
            }
            self.inner.record_event(kind, message)
        }
    }

    fn manager_with(log: Arc<dyn EventLog>, sensor: Sensor) -> AlertManager {
        AlertManager::with_parts(vec![sensor], Vec::new(), log).unwrap()
    }

    #[test]
    fn test_managers_run_in_order() {
        let log = Arc::new(MemoryEventLog::new());
        let mut plant = Plant::default();
        plant.add_manager(manager_with(log.clone(), Sensor::temperature("t1", 80.0).unwrap()));
        plant.add_manager(manager_with(log.clone(), Sensor::humidity("h1", 70.0).unwrap()));

        plant.record_reading(1, "h1", 90.0).unwrap();
        let report = plant.evaluate_all().unwrap();

        assert_eq!(report.managers.len(), 2);
        assert_eq!(report.alert_count(), 1);
        assert_eq!(report.managers[1].alerting, vec!["h1".to_string()]);
        let messages: Vec<String> = log.events().unwrap().into_iter().map(|e| e.message).collect();
        assert_eq!(messages[1], "Sensor t1 within limits.");
        assert_eq!(messages[3], "ALERT: Sensor h1 at threshold (avg=90.00)");
    }

    #[test]
    fn test_unknown_manager_and_sensor() {
        let log = Arc::new(MemoryEventLog::new());
        let mut plant = Plant::new(vec![manager_with(log, Sensor::temperature("t1", 80.0).unwrap())]);

        assert!(matches!(
            plant.record_reading(1, "t1", 1.0),
            Err(AlertError::UnknownManager(1))
        ));
        assert!(matches!(
            plant.record_reading(0, "nope", 1.0),
            Err(AlertError::UnknownSensor(_))
        ));
    }

    #[test]
    fn test_same_id_in_two_managers_stays_separate() {
        let log = Arc::new(MemoryEventLog::new());
        let mut plant = Plant::new(vec![
            manager_with(log.clone(), Sensor::temperature("temp", 80.0).unwrap()),
            manager_with(log.clone(), Sensor::temperature("temp", 80.0).unwrap()),
        ]);

        plant.record_reading(0, "temp", 10.0).unwrap();
        plant.record_reading(1, "temp", 90.0).unwrap();

        assert_eq!(plant.managers()[0].sensor("temp").unwrap().readings(), vec![10.0]);
        assert_eq!(plant.managers()[1].sensor("temp").unwrap().readings(), vec![90.0]);
    }

    #[test]
    fn test_failure_stops_remaining_managers() {
        let log = Arc::new(LimitedLog {
            inner: MemoryEventLog::new(),
            writes: AtomicUsize::new(0),
            limit: 3,
        });
        let plant = Plant::new(vec![
            manager_with(log.clone(), Sensor::temperature("t1", 80.0).unwrap()),
            manager_with(log.clone(), Sensor::temperature("t2", 80.0).unwrap()),
            manager_with(log.clone(), Sensor::temperature("t3", 80.0).unwrap()),
        ]);

        assert!(plant.evaluate_all().is_err());
        // First manager wrote two events, second got one in before the limit
        assert_eq!(log.inner.len().unwrap(), 3);
    }
}
