//! Plant configuration
//!
//! Layers an optional TOML file under `PLANT__*` environment overrides and
//! turns the result into a ready-to-run [`Plant`].

use crate::event_log::EventLog;
use crate::manager::AlertManager;
use crate::notifier::{ConsoleNotifier, EmailNotifier, Notifier, NotifyError, WebhookNotifier};
use crate::plant::Plant;
use crate::AlertError;
use config::{Config, Environment, File, FileFormat};
use sensors::{Sensor, SensorConfig, SensorError, SensorKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid sensor: {0}")]
    Sensor(#[from] SensorError),

    #[error("Invalid notifier: {0}")]
    Notifier(#[from] NotifyError),

    #[error("Invalid manager: {0}")]
    Manager(#[from] AlertError),
}

/// One declared sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSpec {
    pub id: String,
    pub kind: SensorKind,
    #[serde(default)]
    pub window: SensorConfig,
    /// Raw readings replayed by the monitor, one per evaluation round
    #[serde(default)]
    pub readings: Vec<f64>,
}

/// Notifier transport selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifierConfig {
    Email { recipient: String },
    Webhook { url: String },
    Console,
}

impl NotifierConfig {
    pub fn build(&self) -> Result<Box<dyn Notifier>, NotifyError> {
        let notifier: Box<dyn Notifier> = match self {
            Self::Email { recipient } => Box::new(EmailNotifier::new(recipient.as_str())?),
            Self::Webhook { url } => Box::new(WebhookNotifier::new(url.as_str())?),
            Self::Console => Box::new(ConsoleNotifier),
        };
        Ok(notifier)
    }
}

/// One alert manager: its sensors and notifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Label used in logs
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sensors: Vec<SensorSpec>,
    #[serde(default)]
    pub notifiers: Vec<NotifierConfig>,
}

impl ManagerConfig {
    pub fn build(&self, log: Arc<dyn EventLog>) -> Result<AlertManager, ConfigError> {
        let sensors = self
            .sensors
            .iter()
            .map(|spec| Sensor::new(spec.id.as_str(), spec.kind, spec.window))
            .collect::<Result<Vec<_>, _>>()?;
        let notifiers = self
            .notifiers
            .iter()
            .map(NotifierConfig::build)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AlertManager::with_parts(sensors, notifiers, log)?)
    }
}

/// Full plant configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantConfig {
    #[serde(default)]
    pub managers: Vec<ManagerConfig>,
}

impl PlantConfig {
    /// Load from an optional file at `path` plus `PLANT__*` environment overrides
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("PLANT").separator("__"))
            .build()?;

        let config: PlantConfig = settings.try_deserialize()?;
        info!("Loaded plant configuration with {} managers", config.managers.len());
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// The stock demonstration plant: temperature by email, vibration by
    /// webhook, humidity by email, each fed two readings.
    pub fn demo() -> Self {
        let manager = |id: &str, kind: SensorKind, readings: [f64; 2], notifier: NotifierConfig| ManagerConfig {
            name: format!("{}-manager", kind.label()),
            sensors: vec![SensorSpec {
                id: id.to_string(),
                kind,
                window: SensorConfig::default(),
                readings: readings.to_vec(),
            }],
            notifiers: vec![notifier],
        };

        Self {
            managers: vec![
                manager(
                    "temperature_01",
                    SensorKind::Temperature {
                        high_threshold: 80.0,
                    },
                    [75.0, 85.0],
                    NotifierConfig::Email {
                        recipient: "temp@test.com".into(),
                    },
                ),
                manager(
                    "vibration_02",
                    SensorKind::Vibration { rms_threshold: 2.5 },
                    [1.5, 3.0],
                    NotifierConfig::Webhook {
                        url: "http://testVibration.com".into(),
                    },
                ),
                manager(
                    "humidity_04",
                    SensorKind::Humidity { max_humidity: 70.0 },
                    [65.0, 75.0],
                    NotifierConfig::Email {
                        recipient: "humidity@test.com".into(),
                    },
                ),
            ],
        }
    }

    /// Build every manager against one shared event log
    pub fn build(&self, log: Arc<dyn EventLog>) -> Result<Plant, ConfigError> {
        let mut plant = Plant::default();
        for manager in &self.managers {
            plant.add_manager(manager.build(Arc::clone(&log))?);
            info!("Built manager {}", manager.name);
        }
        Ok(plant)
    }

    /// Number of replay rounds: the longest reading list of any sensor
    pub fn rounds(&self) -> usize {
        self.sensor_specs()
            .map(|s| s.readings.len())
            .max()
            .unwrap_or(0)
    }

    /// `(manager_index, sensor_id, raw_value)` triples fed in the given round
    pub fn readings_for_round(&self, round: usize) -> Vec<(usize, &str, f64)> {
        self.managers
            .iter()
            .enumerate()
            .flat_map(|(index, m)| {
                m.sensors.iter().filter_map(move |s| {
                    s.readings.get(round).map(|v| (index, s.id.as_str(), *v))
                })
            })
            .collect()
    }

    fn sensor_specs(&self) -> impl Iterator<Item = &SensorSpec> {
        self.managers.iter().flat_map(|m| m.sensors.iter())
    }
}
