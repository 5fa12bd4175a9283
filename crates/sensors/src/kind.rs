//! Sensor kinds and their alert rules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default high temperature threshold
pub const DEFAULT_HIGH_TEMPERATURE: f64 = 80.0;
/// Default vibration threshold
pub const DEFAULT_RMS_THRESHOLD: f64 = 2.5;
/// Default relative humidity ceiling (%)
pub const DEFAULT_MAX_HUMIDITY: f64 = 70.0;
/// Default particle concentration ceiling (ppm)
pub const DEFAULT_MAX_PPM: f64 = 100.0;

/// Kind of sensor, each carrying its own threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SensorKind {
    /// Alerts when the average reaches `high_threshold`
    Temperature {
        #[serde(default = "default_high_temperature")]
        high_threshold: f64,
    },

    /// Alerts when the absolute average reaches `rms_threshold`.
    ///
    /// This is the magnitude of the mean, not an RMS over raw samples.
    Vibration {
        #[serde(default = "default_rms_threshold")]
        rms_threshold: f64,
    },

    /// Alerts when the average reaches `max_humidity`
    Humidity {
        #[serde(default = "default_max_humidity")]
        max_humidity: f64,
    },

    /// Alerts when the average reaches `max_ppm`
    AirContamination {
        #[serde(default = "default_max_ppm")]
        max_ppm: f64,
    },
}

fn default_high_temperature() -> f64 {
    DEFAULT_HIGH_TEMPERATURE
}

fn default_rms_threshold() -> f64 {
    DEFAULT_RMS_THRESHOLD
}

fn default_max_humidity() -> f64 {
    DEFAULT_MAX_HUMIDITY
}

fn default_max_ppm() -> f64 {
    DEFAULT_MAX_PPM
}

impl SensorKind {
    /// Temperature kind with the default threshold
    pub fn temperature() -> Self {
        Self::Temperature {
            high_threshold: DEFAULT_HIGH_TEMPERATURE,
        }
    }

    /// Vibration kind with the default threshold
    pub fn vibration() -> Self {
        Self::Vibration {
            rms_threshold: DEFAULT_RMS_THRESHOLD,
        }
    }

    /// Humidity kind with the default threshold
    pub fn humidity() -> Self {
        Self::Humidity {
            max_humidity: DEFAULT_MAX_HUMIDITY,
        }
    }

    /// Air contamination kind with the default threshold
    pub fn air_contamination() -> Self {
        Self::AirContamination {
            max_ppm: DEFAULT_MAX_PPM,
        }
    }

    /// The threshold this kind compares against
    pub fn threshold(&self) -> f64 {
        match *self {
            Self::Temperature { high_threshold } => high_threshold,
            Self::Vibration { rms_threshold } => rms_threshold,
            Self::Humidity { max_humidity } => max_humidity,
            Self::AirContamination { max_ppm } => max_ppm,
        }
    }

    /// Short lowercase label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Temperature { .. } => "temperature",
            Self::Vibration { .. } => "vibration",
            Self::Humidity { .. } => "humidity",
            Self::AirContamination { .. } => "air_contamination",
        }
    }

    /// Alert predicate; boundaries are inclusive
    pub fn is_alert(&self, average: f64) -> bool {
        match *self {
            Self::Temperature { high_threshold } => average >= high_threshold,
            Self::Vibration { rms_threshold } => average.abs() >= rms_threshold,
            Self::Humidity { max_humidity } => average >= max_humidity,
            Self::AirContamination { max_ppm } => average >= max_ppm,
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (threshold {})", self.label(), self.threshold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_inclusive() {
        assert!(SensorKind::temperature().is_alert(80.0));
        assert!(!SensorKind::temperature().is_alert(79.99));
        assert!(SensorKind::humidity().is_alert(70.0));
        assert!(SensorKind::air_contamination().is_alert(100.0));
        assert!(!SensorKind::air_contamination().is_alert(99.0));
    }

    #[test]
    fn test_vibration_uses_magnitude_of_average() {
        let kind = SensorKind::vibration();
        assert!(kind.is_alert(-2.5));
        assert!(kind.is_alert(3.0));
        assert!(!kind.is_alert(-2.4));
        assert!(!kind.is_alert(2.25));
    }

    #[test]
    fn test_non_positive_threshold_alerts_at_zero() {
        let kind = SensorKind::Temperature {
            high_threshold: 0.0,
        };
        assert!(kind.is_alert(0.0));
    }

    #[test]
    fn test_threshold_and_label() {
        let kind = SensorKind::AirContamination { max_ppm: 42.0 };
        assert_eq!(kind.threshold(), 42.0);
        assert_eq!(kind.label(), "air_contamination");
        assert_eq!(kind.to_string(), "air_contamination (threshold 42)");
    }
}
