//! Plant Sensors
//!
//! Sensors keep a calibrated rolling window of readings and decide, per kind,
//! whether their average has crossed the alert threshold.

mod error;
mod kind;
mod sensor;

pub use error::SensorError;
pub use kind::SensorKind;
pub use sensor::{Sensor, SensorConfig};
