//! Sensor Error Types

use thiserror::Error;

/// Errors rejected at sensor construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorError {
    /// Sensor id is empty
    #[error("Sensor id must not be empty")]
    EmptyId,

    /// Window size of zero
    #[error("Sensor {id}: window size must be greater than zero")]
    InvalidWindow { id: String },

    /// Threshold is NaN or infinite
    #[error("Sensor {id}: {kind} threshold {value} is not finite")]
    NonFiniteThreshold {
        id: String,
        kind: &'static str,
        value: f64,
    },

    /// Calibration offset is NaN or infinite
    #[error("Sensor {id}: calibration offset {value} is not finite")]
    NonFiniteCalibration { id: String, value: f64 },
}
