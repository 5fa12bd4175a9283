//! Windowed sensor

use crate::error::SensorError;
use crate::kind::SensorKind;
use ring_buffer::{RingBuffer, DEFAULT_CAPACITY};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Sensor window configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Number of readings kept for the rolling average (default: 5)
    pub window_size: usize,
    /// Additive correction applied to every raw reading (default: 0.0)
    pub calibration_offset: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_CAPACITY,
            calibration_offset: 0.0,
        }
    }
}

/// A plant sensor: calibrated rolling window plus a kind-specific alert rule
#[derive(Debug, Clone)]
pub struct Sensor {
    id: String,
    kind: SensorKind,
    calibration_offset: f64,
    window: RingBuffer,
}

impl Sensor {
    /// Create a sensor, rejecting invalid configuration
    pub fn new(
        id: impl Into<String>,
        kind: SensorKind,
        config: SensorConfig,
    ) -> Result<Self, SensorError> {
        let id = id.into();
        if id.is_empty() {
            return Err(SensorError::EmptyId);
        }
        if !kind.threshold().is_finite() {
            return Err(SensorError::NonFiniteThreshold {
                id,
                kind: kind.label(),
                value: kind.threshold(),
            });
        }
        if !config.calibration_offset.is_finite() {
            return Err(SensorError::NonFiniteCalibration {
                id,
                value: config.calibration_offset,
            });
        }
        let window = RingBuffer::new(config.window_size)
            .map_err(|_| SensorError::InvalidWindow { id: id.clone() })?;

        debug!("Created {} sensor {} (window {})", kind.label(), id, config.window_size);
        Ok(Self {
            id,
            kind,
            calibration_offset: config.calibration_offset,
            window,
        })
    }

    /// Temperature sensor with default window and no calibration
    pub fn temperature(id: impl Into<String>, high_threshold: f64) -> Result<Self, SensorError> {
        Self::new(id, SensorKind::Temperature { high_threshold }, SensorConfig::default())
    }

    /// Vibration sensor with default window and no calibration
    pub fn vibration(id: impl Into<String>, rms_threshold: f64) -> Result<Self, SensorError> {
        Self::new(id, SensorKind::Vibration { rms_threshold }, SensorConfig::default())
    }

    /// Humidity sensor with default window and no calibration
    pub fn humidity(id: impl Into<String>, max_humidity: f64) -> Result<Self, SensorError> {
        Self::new(id, SensorKind::Humidity { max_humidity }, SensorConfig::default())
    }

    /// Air contamination sensor with default window and no calibration
    pub fn air_contamination(id: impl Into<String>, max_ppm: f64) -> Result<Self, SensorError> {
        Self::new(id, SensorKind::AirContamination { max_ppm }, SensorConfig::default())
    }

    /// Record a raw reading; the calibrated value enters the window.
    ///
    /// Values are not validated, NaN and infinities pass straight through.
    pub fn record_reading(&mut self, raw_value: f64) {
        let adjusted = raw_value + self.calibration_offset;
        self.window.push(adjusted);
        trace!("Sensor {} recorded {} (raw {})", self.id, adjusted, raw_value);
    }

    /// Rolling average of the window, 0.0 when no readings are stored
    pub fn average(&self) -> f64 {
        self.window.mean()
    }

    /// Whether the current average crosses this sensor's threshold
    pub fn is_in_alert(&self) -> bool {
        self.kind.is_alert(self.average())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn window_size(&self) -> usize {
        self.window.capacity()
    }

    pub fn calibration_offset(&self) -> f64 {
        self.calibration_offset
    }

    /// Calibrated readings currently in the window, oldest first
    pub fn readings(&self) -> Vec<f64> {
        self.window.iter().collect()
    }
}
