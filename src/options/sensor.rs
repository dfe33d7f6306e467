//! `[sensor]` section: keyboard-simulated tilt.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Simulated orientation input for hosts without a tilt sensor.
pub struct SensorOptions {
    /// Tilt angle (degrees) emitted per key press.
    pub key_tilt_degrees: f32,
}

impl Default for SensorOptions {
    fn default() -> Self {
        Self {
            key_tilt_degrees: 15.0,
        }
    }
}
