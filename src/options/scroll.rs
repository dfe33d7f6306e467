//! `[scroll]` section: tilt sensitivity and clamp bound.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Tilt-to-scroll mapping constants.
pub struct ScrollOptions {
    /// World units of scroll per degree of tilt, per reading.
    pub sensitivity: f32,
    /// Upper clamp bound for the scroll offset (lower bound is 0).
    pub max_offset: f32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            sensitivity: 0.02,
            max_offset: 10.0,
        }
    }
}
